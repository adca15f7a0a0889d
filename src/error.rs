use std::num::ParseIntError;
use thiserror::Error;

/// Failures of the happiness computation for a single dataset.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(
        "column lengths differ: {preferences} preference lists, {ranks} rank lists, {capacities} capacities"
    )]
    Misaligned {
        preferences: usize,
        ranks: usize,
        capacities: usize,
    },

    #[error("hospital #{entity}: rank '{token}' is not an integer")]
    InvalidRank {
        entity: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("hospital #{entity}: rank total does not fit in 64 bits")]
    RankOverflow { entity: usize },

    #[error("hospital #{entity} declares zero capacity")]
    ZeroCapacity { entity: usize },

    #[error("dataset has no hospital rows")]
    EmptyDataset,

    #[error("{scores} happiness scores but {filled} filled percentages")]
    SummaryMismatch { scores: usize, filled: usize },
}
