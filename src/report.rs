use crate::analyzer::DatasetEvaluation;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Render a float the way Python's `repr` does: shortest round-trip digits,
/// always with a fractional part or an exponent.
pub fn python_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return scientific;
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// The per-dataset summary block, including its trailing blank line.
pub fn render_summary(evaluation: &DatasetEvaluation, show_extremes: bool) -> String {
    let summary = &evaluation.summary;
    let mut content = String::new();

    // The trailing space after the colon is part of the format.
    content.push_str(&format!("{}: \n", evaluation.dataset));
    content.push_str(&format!(
        "Average Happiness: {}\n",
        python_float(summary.average_happiness)
    ));
    content.push_str(&format!(
        "Standard Deviation: {}\n",
        python_float(summary.standard_deviation)
    ));
    if show_extremes {
        content.push_str(&format!(
            "Best Happiness: {}\n",
            python_float(summary.best_happiness)
        ));
        content.push_str(&format!(
            "Worst Happiness: {}\n",
            python_float(summary.worst_happiness)
        ));
    }
    content.push_str(&format!(
        "average filled percentage: {}\n",
        python_float(summary.average_filled_percentage)
    ));
    content.push('\n');

    content
}

/// `<stem>_happiness.csv` for a dataset identifier.
pub fn scores_file_name(dataset: &str) -> String {
    let stem = Path::new(dataset)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(dataset);
    format!("{}_happiness.csv", stem)
}

/// Write one row per hospital with its happiness score, in file order.
pub fn write_scores_csv(evaluation: &DatasetEvaluation, output_dir: &Path) -> Result<PathBuf> {
    use csv::Writer;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let csv_path = output_dir.join(scores_file_name(&evaluation.dataset));
    let mut writer = Writer::from_path(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;

    writer.write_record([
        "hospitalId",
        "capacity",
        "assignmentCount",
        "filledPercentage",
        "happiness",
    ])?;

    for (record, score) in evaluation.scored_records() {
        let capacity = record.capacity.to_string();
        let filled_slots = record.filled_slots().to_string();
        let filled_percentage = python_float(record.filled_percentage);
        let happiness = python_float(score);

        writer.write_record([
            record.hospital_id.as_str(),
            capacity.as_str(),
            filled_slots.as_str(),
            filled_percentage.as_str(),
            happiness.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(csv_path)
}
