//! Scores hospital happiness in hospital/resident matching exports.
//!
//! Each hospital's happiness is the mean cost over its capacity slots: a
//! filled slot costs the resident's rank on the hospital's list, an unranked
//! or empty slot costs the full length of that list. Lower is better.

pub mod analyzer;
pub mod batch;
pub mod error;
pub mod importer;
pub mod models;
pub mod report;
pub mod stats;
pub mod telemetry;

pub use analyzer::{compute_happiness, DatasetEvaluation, HappinessAnalyzer, HappinessSummary};
pub use batch::{dataset_sources, DatasetSource};
pub use error::EvalError;
pub use importer::HospitalImporter;
pub use models::{Config, DatasetInfo, HospitalRecord, HospitalTable};
