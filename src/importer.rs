use crate::models::{HospitalRecord, HospitalTable};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads hospital exports written by the matching runs.
///
/// The exporter separates cells with `", "`, so both header names and cells
/// are trimmed before they are matched against [`HospitalRecord`] fields.
pub struct HospitalImporter {
    delimiter: u8,
}

impl HospitalImporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn import_file(&self, path: &Path) -> Result<HospitalTable> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

        self.import_reader(file)
            .with_context(|| format!("Failed to parse dataset: {}", path.display()))
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<HospitalTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<HospitalRecord>().enumerate() {
            let record = row.with_context(|| format!("Invalid hospital row #{}", index + 1))?;
            records.push(record);
        }

        Ok(HospitalTable::new(records))
    }
}

impl Default for HospitalImporter {
    fn default() -> Self {
        Self::new()
    }
}
