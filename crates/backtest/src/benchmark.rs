//! Naive-forecast benchmark.
//!
//! The benchmark is the sum of absolute naive-forecast errors over every
//! validation row. It is computed once per run and is the denominator of
//! every model's score.

use airline_forecast_core::{ForecastError, ResolvedObservation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// `sum(|final_demand - naive_forecast|)`.
    pub total_abs_error: f64,
    /// Validation rows that carried a naive forecast.
    pub rows: usize,
}

impl Benchmark {
    /// Computes the benchmark over resolved validation rows.
    ///
    /// Rows without a naive forecast are not counted.
    ///
    /// # Errors
    /// Returns `ForecastError::ZeroBenchmark` if the sum is zero (or there
    /// are no rows), since every score would then be undefined.
    pub fn from_validation(validation: &[ResolvedObservation]) -> Result<Self, ForecastError> {
        let (total_abs_error, rows) = validation
            .iter()
            .filter_map(|row| {
                row.observation
                    .naive_forecast
                    .map(|naive| (f64::from(row.final_demand) - naive).abs())
            })
            .fold((0.0_f64, 0_usize), |(sum, count), err| (sum + err, count + 1));

        if total_abs_error <= 0.0 || !total_abs_error.is_finite() {
            return Err(ForecastError::ZeroBenchmark { rows });
        }

        tracing::info!(benchmark = total_abs_error, rows, "Computed naive benchmark");
        Ok(Self {
            total_abs_error,
            rows,
        })
    }
}
