use crate::error::EvalError;
use crate::importer::HospitalImporter;
use crate::models::{DatasetInfo, HospitalRecord, HospitalTable};
use crate::stats;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

/// Rank values above this are positions in the hospital's preference list.
/// `-1` marks a resident the hospital never ranked.
pub const UNRANKED: i64 = -1;

/// Mean cost per capacity slot for every hospital, in input order.
///
/// A filled slot costs its rank, an unranked fill or an empty slot costs the
/// length of that hospital's own preference list. Entries beyond capacity are
/// still summed.
pub fn compute_happiness<P, R>(
    preference_lists: &[Vec<P>],
    rank_lists: &[Vec<R>],
    capacities: &[u32],
) -> Result<Vec<f64>, EvalError>
where
    R: AsRef<str>,
{
    if preference_lists.len() != rank_lists.len() || rank_lists.len() != capacities.len() {
        return Err(EvalError::Misaligned {
            preferences: preference_lists.len(),
            ranks: rank_lists.len(),
            capacities: capacities.len(),
        });
    }

    preference_lists
        .iter()
        .zip(rank_lists)
        .zip(capacities)
        .enumerate()
        .map(|(entity, ((preferences, ranks), &capacity))| {
            entity_happiness(entity, preferences.len(), ranks, capacity)
        })
        .collect()
}

fn entity_happiness<R: AsRef<str>>(
    entity: usize,
    preference_count: usize,
    ranks: &[R],
    capacity: u32,
) -> Result<f64, EvalError> {
    if capacity == 0 {
        return Err(EvalError::ZeroCapacity { entity });
    }

    let penalty = preference_count as i64;
    let mut total: i64 = 0;
    for token in ranks {
        let token = token.as_ref().trim();
        let rank: i64 = token.parse().map_err(|source| EvalError::InvalidRank {
            entity,
            token: token.to_string(),
            source,
        })?;
        let cost = if rank > UNRANKED { rank } else { penalty };
        total = total
            .checked_add(cost)
            .ok_or(EvalError::RankOverflow { entity })?;
    }

    let unfilled = (capacity as usize).saturating_sub(ranks.len()) as i64;
    total = penalty
        .checked_mul(unfilled)
        .and_then(|padding| total.checked_add(padding))
        .ok_or(EvalError::RankOverflow { entity })?;

    Ok(total as f64 / capacity as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HappinessSummary {
    pub hospitals: usize,
    pub average_happiness: f64,
    pub standard_deviation: f64,
    pub best_happiness: f64,
    pub worst_happiness: f64,
    pub average_filled_percentage: f64,
}

impl HappinessSummary {
    pub fn from_scores(scores: &[f64], filled_percentages: &[f64]) -> Result<Self, EvalError> {
        if scores.len() != filled_percentages.len() {
            return Err(EvalError::SummaryMismatch {
                scores: scores.len(),
                filled: filled_percentages.len(),
            });
        }

        let average_happiness = stats::mean(scores).ok_or(EvalError::EmptyDataset)?;
        let standard_deviation = stats::population_std_dev(scores).ok_or(EvalError::EmptyDataset)?;
        let average_filled_percentage =
            stats::sequential_mean(filled_percentages).ok_or(EvalError::EmptyDataset)?;

        // Lower is happier
        let best_happiness = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let worst_happiness = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            hospitals: scores.len(),
            average_happiness,
            standard_deviation,
            best_happiness,
            worst_happiness,
            average_filled_percentage,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DatasetEvaluation {
    pub dataset: String,
    pub info: Option<DatasetInfo>,
    pub records: Vec<HospitalRecord>,
    pub scores: Vec<f64>,
    pub summary: HappinessSummary,
}

impl DatasetEvaluation {
    /// `(record, score)` pairs in file order.
    pub fn scored_records(&self) -> impl Iterator<Item = (&HospitalRecord, f64)> {
        self.records.iter().zip(self.scores.iter().copied())
    }
}

pub struct HappinessAnalyzer {
    importer: HospitalImporter,
}

impl HappinessAnalyzer {
    pub fn new() -> Self {
        Self::with_importer(HospitalImporter::new())
    }

    pub fn with_importer(importer: HospitalImporter) -> Self {
        Self { importer }
    }

    /// Load and score one dataset file. `dataset` is the identifier used in
    /// reports; `path` is where the rows are read from.
    pub fn evaluate_file(&self, dataset: &str, path: &Path) -> Result<DatasetEvaluation> {
        let table = self.importer.import_file(path)?;
        info!(dataset, path = %path.display(), hospitals = table.len(), "loaded dataset");

        let evaluation = self.evaluate_table(dataset, table)?;
        Ok(evaluation)
    }

    pub fn evaluate_table(
        &self,
        dataset: &str,
        table: HospitalTable,
    ) -> Result<DatasetEvaluation, EvalError> {
        if table.is_empty() {
            return Err(EvalError::EmptyDataset);
        }

        let info = Path::new(dataset)
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(DatasetInfo::from_file_name);
        if let Some(info) = info {
            debug!(
                dataset,
                hospitals = info.hospitals,
                locations = info.locations,
                residents = info.residents,
                couples = info.couples,
                "dataset parameters"
            );
            if info.hospitals as usize != table.len() {
                warn!(
                    dataset,
                    expected = info.hospitals,
                    found = table.len(),
                    "hospital count differs from dataset name"
                );
            }
        }

        let preference_lists = table.preference_lists();
        let rank_lists = table.rank_lists();
        let capacities = table.capacities();

        for (record, ranks) in table.records.iter().zip(&rank_lists) {
            if ranks.len() > record.capacity as usize {
                warn!(
                    dataset,
                    hospital = %record.hospital_id,
                    capacity = record.capacity,
                    assigned = ranks.len(),
                    "more assignments than capacity"
                );
            }
        }

        let scores = compute_happiness(&preference_lists, &rank_lists, &capacities)?;
        let summary = HappinessSummary::from_scores(&scores, &table.filled_percentages())?;

        Ok(DatasetEvaluation {
            dataset: dataset.to_string(),
            info,
            records: table.records,
            scores,
            summary,
        })
    }
}

impl Default for HappinessAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
