use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_directory: Option<String>,
    // Evaluated in this order
    pub datasets: Vec<String>,
    pub scores_directory: Option<String>,
    pub show_extremes: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: Some("matching_output".to_string()),
            datasets: vec![
                "export_hos100_loc10_res200_coup50_hospitals.csv".to_string(),
                "export_hos300_loc50_res500_coup100_hospitals.csv".to_string(),
                "export_hos50_loc50_res100_coup50_hospitals.csv".to_string(),
                "export_hos50_loc50_res150_coup20_hospitals.csv".to_string(),
                "export_hos5_loc2_res16_coup3_hospitals.csv".to_string(),
            ],
            scores_directory: None,
            show_extremes: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }

    /// Resolve a configured dataset name against `data_directory`.
    /// Absolute names are returned untouched.
    pub fn dataset_path(&self, dataset: &str) -> PathBuf {
        let path = Path::new(dataset);
        match &self.data_directory {
            Some(dir) if path.is_relative() => Path::new(dir).join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// One hospital row of a matching export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRecord {
    #[serde(default)]
    pub hospital_id: String,
    #[serde(default)]
    pub hospital_location: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub assignment_count: Option<u32>,
    pub filled_percentage: f64,
    pub preferences: String,
    #[serde(default)]
    pub assignments: Option<String>,
    pub assignment_ranks: String,
}

impl HospitalRecord {
    pub fn preference_tokens(&self) -> Vec<&str> {
        split_tokens(&self.preferences)
    }

    pub fn rank_tokens(&self) -> Vec<&str> {
        split_tokens(&self.assignment_ranks)
    }

    pub fn filled_slots(&self) -> usize {
        self.assignment_count
            .map(|count| count as usize)
            .unwrap_or_else(|| self.rank_tokens().len())
    }
}

/// Split a space separated list cell, dropping empty tokens.
pub fn split_tokens(cell: &str) -> Vec<&str> {
    cell.split_whitespace().collect()
}

/// All rows of one dataset, in file order.
#[derive(Debug, Clone, Default)]
pub struct HospitalTable {
    pub records: Vec<HospitalRecord>,
}

impl HospitalTable {
    pub fn new(records: Vec<HospitalRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn preference_lists(&self) -> Vec<Vec<&str>> {
        self.records.iter().map(HospitalRecord::preference_tokens).collect()
    }

    pub fn rank_lists(&self) -> Vec<Vec<&str>> {
        self.records.iter().map(HospitalRecord::rank_tokens).collect()
    }

    pub fn capacities(&self) -> Vec<u32> {
        self.records.iter().map(|record| record.capacity).collect()
    }

    pub fn filled_percentages(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.filled_percentage).collect()
    }
}

/// Generator parameters encoded in an export name such as
/// `export_hos50_loc50_res100_coup50_hospitals.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetInfo {
    pub hospitals: u32,
    pub locations: u32,
    pub residents: u32,
    pub couples: u32,
}

impl DatasetInfo {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let pattern = Regex::new(r"hos(\d+)_loc(\d+)_res(\d+)_coup(\d+)").ok()?;
        let caps = pattern.captures(file_name)?;

        Some(Self {
            hospitals: caps[1].parse().ok()?,
            locations: caps[2].parse().ok()?,
            residents: caps[3].parse().ok()?,
            couples: caps[4].parse().ok()?,
        })
    }
}
