use crate::analyzer::HappinessAnalyzer;
use crate::models::Config;
use crate::report;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// A dataset to evaluate: the identifier printed in the report and the file
/// it is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub name: String,
    pub path: PathBuf,
}

/// Datasets named on the command line are used as given; configured ones are
/// resolved against `data_directory`.
pub fn dataset_sources(config: &Config, cli_datasets: Vec<String>) -> Vec<DatasetSource> {
    if !cli_datasets.is_empty() {
        return cli_datasets
            .into_iter()
            .map(|name| DatasetSource {
                path: PathBuf::from(&name),
                name,
            })
            .collect();
    }

    config
        .datasets
        .iter()
        .map(|name| DatasetSource {
            name: name.clone(),
            path: config.dataset_path(name),
        })
        .collect()
}

/// Evaluate every source in order, writing each summary block to `out`.
///
/// A dataset that fails is logged and skipped. Returns how many failed;
/// only a failure to write to `out` aborts the run.
pub fn run<W: Write>(
    analyzer: &HappinessAnalyzer,
    config: &Config,
    sources: &[DatasetSource],
    out: &mut W,
) -> std::io::Result<usize> {
    let mut failures = 0usize;

    for source in sources {
        let evaluation = match analyzer.evaluate_file(&source.name, &source.path) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                failures += 1;
                error!(dataset = %source.name, "evaluation failed: {:#}", e);
                continue;
            }
        };

        out.write_all(report::render_summary(&evaluation, config.show_extremes).as_bytes())?;

        if let Some(dir) = &config.scores_directory {
            match report::write_scores_csv(&evaluation, Path::new(dir)) {
                Ok(path) => info!(dataset = %source.name, path = %path.display(), "scores exported"),
                Err(e) => {
                    failures += 1;
                    error!(dataset = %source.name, "score export failed: {:#}", e);
                }
            }
        }
    }

    out.flush()?;
    Ok(failures)
}
