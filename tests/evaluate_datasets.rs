use matching_evaluator::analyzer::HappinessAnalyzer;
use matching_evaluator::batch::{self, dataset_sources, DatasetSource};
use matching_evaluator::models::Config;
use matching_evaluator::{report, EvalError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "hospitalId, hospitalLocation, capacity, assignmentCount, filledPercentage, preferences, assignments, assignmentRanks";

fn write_export(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }

    let path = dir.join(name);
    fs::write(&path, content).expect("export written");
    path
}

fn sample_export(dir: &Path) -> PathBuf {
    write_export(
        dir,
        "export_hos4_loc2_res8_coup1_hospitals.csv",
        &[
            "H0, 0, 2, 2, 1.0, R1 R2 R3 R4 R5, R1 R3, 0 2",
            "H1, 1, 2, 2, 1.0, R2 R4 R6 R8, R7 R5, -1 -1",
            "H2, 0, 2, 0, 0.0, R3 R5 R7, , ",
            "H3, 1, 1, 1, 1.0, R6 R8, R6, 0",
        ],
    )
}

#[test]
fn evaluates_export_and_renders_summary() {
    let dir = TempDir::new().expect("temp dir");
    let path = sample_export(dir.path());

    let evaluation = HappinessAnalyzer::new()
        .evaluate_file("export_hos4_loc2_res8_coup1_hospitals.csv", &path)
        .expect("dataset evaluates");

    assert_eq!(evaluation.scores, vec![1.0, 4.0, 3.0, 0.0]);
    assert_eq!(evaluation.info.map(|info| info.hospitals), Some(4));
    assert_eq!(
        report::render_summary(&evaluation, false),
        "export_hos4_loc2_res8_coup1_hospitals.csv: \n\
         Average Happiness: 2.0\n\
         Standard Deviation: 1.5811388300841898\n\
         average filled percentage: 0.75\n\
         \n"
    );
}

#[test]
fn extremes_report_best_and_worst_hospital() {
    let dir = TempDir::new().expect("temp dir");
    let path = sample_export(dir.path());

    let evaluation = HappinessAnalyzer::new()
        .evaluate_file("sample", &path)
        .expect("dataset evaluates");
    let text = report::render_summary(&evaluation, true);

    assert!(text.contains("Best Happiness: 0.0\n"));
    assert!(text.contains("Worst Happiness: 4.0\n"));
}

#[test]
fn exported_scores_follow_file_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = sample_export(dir.path());
    let scores_dir = dir.path().join("scores");

    let evaluation = HappinessAnalyzer::new()
        .evaluate_file("export_hos4_loc2_res8_coup1_hospitals.csv", &path)
        .expect("dataset evaluates");
    let written = report::write_scores_csv(&evaluation, &scores_dir).expect("scores written");

    assert_eq!(
        written.file_name().and_then(|name| name.to_str()),
        Some("export_hos4_loc2_res8_coup1_hospitals_happiness.csv")
    );
    let content = fs::read_to_string(written).expect("scores readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "H0,2,2,1.0,1.0");
    assert_eq!(lines[2], "H1,2,2,1.0,4.0");
    assert_eq!(lines[3], "H2,2,0,0.0,3.0");
    assert_eq!(lines[4], "H3,1,1,1.0,0.0");
}

#[test]
fn zero_capacity_fails_only_its_dataset() {
    let dir = TempDir::new().expect("temp dir");
    let first = sample_export(dir.path());
    let broken = write_export(
        dir.path(),
        "broken_hospitals.csv",
        &["H0, 0, 0, 0, 0.0, R1 R2, , "],
    );
    let last = write_export(
        dir.path(),
        "last_hospitals.csv",
        &["H0, 0, 1, 1, 1.0, R1 R2 R3, R2, 1"],
    );

    let sources = vec![
        DatasetSource {
            name: "first.csv".to_string(),
            path: first,
        },
        DatasetSource {
            name: "broken.csv".to_string(),
            path: broken,
        },
        DatasetSource {
            name: "last.csv".to_string(),
            path: last,
        },
    ];

    let mut out = Vec::new();
    let failures = batch::run(&HappinessAnalyzer::new(), &Config::default(), &sources, &mut out)
        .expect("output is writable");
    let printed = String::from_utf8(out).expect("utf-8 report");

    assert_eq!(failures, 1);
    assert_eq!(
        printed,
        "first.csv: \n\
         Average Happiness: 2.0\n\
         Standard Deviation: 1.5811388300841898\n\
         average filled percentage: 0.75\n\
         \n\
         last.csv: \n\
         Average Happiness: 1.0\n\
         Standard Deviation: 0.0\n\
         average filled percentage: 1.0\n\
         \n"
    );
}

#[test]
fn batch_run_exports_scores_for_successful_datasets() {
    let dir = TempDir::new().expect("temp dir");
    let path = sample_export(dir.path());
    let scores_dir = dir.path().join("scores");
    let config = Config {
        scores_directory: scores_dir.to_str().map(str::to_string),
        ..Config::default()
    };
    let sources = dataset_sources(&config, vec![path.to_str().expect("utf-8 path").to_string()]);

    let mut out = Vec::new();
    let failures = batch::run(&HappinessAnalyzer::new(), &config, &sources, &mut out)
        .expect("output is writable");

    assert_eq!(failures, 0);
    assert!(scores_dir
        .join("export_hos4_loc2_res8_coup1_hospitals_happiness.csv")
        .exists());
}

#[test]
fn command_line_datasets_are_used_as_given() {
    let config = Config {
        data_directory: Some("elsewhere".to_string()),
        ..Config::default()
    };
    let sources = dataset_sources(&config, vec!["local_hospitals.csv".to_string()]);

    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "local_hospitals.csv");
    assert_eq!(sources[0].path, Path::new("local_hospitals.csv"));
}

#[test]
fn malformed_rank_token_names_the_token() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(
        dir.path(),
        "typo_hospitals.csv",
        &["H0, 0, 2, 2, 1.0, R1 R2 R3, R1 R2, 0 one"],
    );

    let err = HappinessAnalyzer::new()
        .evaluate_file("typo_hospitals.csv", &path)
        .expect_err("rank token is not an integer");
    assert!(err.to_string().contains("'one'"));
}

#[test]
fn missing_dataset_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent_hospitals.csv");

    let err = HappinessAnalyzer::new()
        .evaluate_file("absent_hospitals.csv", &missing)
        .expect_err("file does not exist");
    assert!(format!("{err:#}").contains("absent_hospitals.csv"));
}

#[test]
fn header_only_export_is_an_empty_dataset() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_export(dir.path(), "empty_hospitals.csv", &[]);

    let err = HappinessAnalyzer::new()
        .evaluate_file("empty_hospitals.csv", &path)
        .expect_err("no rows");
    assert!(matches!(
        err.downcast_ref::<EvalError>(),
        Some(EvalError::EmptyDataset)
    ));
}

#[test]
fn configured_datasets_resolve_against_data_directory() {
    let dir = TempDir::new().expect("temp dir");
    sample_export(dir.path());

    let config = Config {
        data_directory: dir.path().to_str().map(str::to_string),
        datasets: vec!["export_hos4_loc2_res8_coup1_hospitals.csv".to_string()],
        ..Config::default()
    };

    let name = &config.datasets[0];
    let evaluation = HappinessAnalyzer::new()
        .evaluate_file(name, &config.dataset_path(name))
        .expect("configured dataset evaluates");
    assert_eq!(evaluation.dataset, "export_hos4_loc2_res8_coup1_hospitals.csv");
    assert_eq!(evaluation.summary.hospitals, 4);
}
