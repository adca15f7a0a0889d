use anyhow::{bail, Result};
use clap::{Arg, ArgAction, Command};
use matching_evaluator::analyzer::HappinessAnalyzer;
use matching_evaluator::batch::{self, dataset_sources};
use matching_evaluator::models::Config;
use matching_evaluator::telemetry;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    let matches = Command::new("matching-evaluator")
        .version("1.0")
        .about("Scores hospital happiness in hospital/resident matching results")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("evaluator.toml"),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the configured dataset files"),
        )
        .arg(
            Arg::new("scores-dir")
                .short('o')
                .long("scores-dir")
                .value_name("DIR")
                .help("Write per-hospital happiness scores as CSV into this directory"),
        )
        .arg(
            Arg::new("extremes")
                .long("extremes")
                .action(ArgAction::SetTrue)
                .help("Also report the best and worst hospital happiness"),
        )
        .arg(
            Arg::new("datasets")
                .value_name("DATASET")
                .num_args(0..)
                .help("Hospital export files to evaluate instead of the configured list"),
        )
        .get_matches();

    let config_file = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("evaluator.toml");
    let cli_datasets: Vec<String> = matches
        .get_many::<String>("datasets")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    // Load or create configuration
    let mut config = if Path::new(config_file).exists() {
        Config::load_from_file(config_file)?
    } else if cli_datasets.is_empty() {
        println!("📝 Creating default configuration file: {}", config_file);
        Config::default().save_to_file(config_file)?;
        println!(
            "⚠️  Please review {} (data_directory, datasets) and run the program again.",
            config_file
        );
        return Ok(());
    } else {
        Config::default()
    };

    if let Some(dir) = matches.get_one::<String>("data-dir") {
        config.data_directory = Some(dir.clone());
    }
    if let Some(dir) = matches.get_one::<String>("scores-dir") {
        config.scores_directory = Some(dir.clone());
    }
    if matches.get_flag("extremes") {
        config.show_extremes = true;
    }

    telemetry::init(&config.log_level)?;
    info!(config = config_file, "configuration loaded");

    let sources = dataset_sources(&config, cli_datasets);
    if sources.is_empty() {
        bail!("No datasets configured in {}", config_file);
    }

    let analyzer = HappinessAnalyzer::new();
    let stdout = std::io::stdout();
    let failures = batch::run(&analyzer, &config, &sources, &mut stdout.lock())?;

    if failures > 0 {
        bail!("{} of {} datasets could not be evaluated", failures, sources.len());
    }
    Ok(())
}
