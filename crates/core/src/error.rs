//! Error taxonomy for the forecasting pipeline.
//!
//! Only faults that abort a run live here. A validation row that finds no
//! matching aggregate key (a join miss) is routine and is counted on the
//! forecast table instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which input table a record or column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Historical booking curves used to build the model aggregates.
    Training,
    /// Booking curves the models are scored against.
    Validation,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Training => write!(f, "training"),
            Dataset::Validation => write!(f, "validation"),
        }
    }
}

/// Domain errors raised while loading, normalizing, or scoring bookings.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A required column is absent from an input table.
    #[error("{dataset} dataset is missing required column '{column}'")]
    Schema { dataset: Dataset, column: String },

    /// A row could not be parsed or its dates are inconsistent.
    #[error("{dataset} dataset, line {line}: {reason}")]
    MalformedRecord {
        dataset: Dataset,
        line: u64,
        reason: String,
    },

    /// The naive forecast is perfect on every validation row, so no score
    /// can be normalized against it.
    #[error("naive forecast benchmark is zero over {rows} validation rows; model scores are undefined")]
    ZeroBenchmark { rows: usize },
}

impl ForecastError {
    /// Builds a `MalformedRecord` error.
    pub fn malformed(dataset: Dataset, line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            dataset,
            line,
            reason: reason.into(),
        }
    }
}
