//! File-to-results pipeline.
//!
//! Reads both booking tables named by the configuration, normalizes them
//! with the configured date formats and malformed-row policy, and runs the
//! backtest.

use airline_forecast_core::{AppConfig, Dataset};
use airline_forecast_data::{required_columns, BookingNormalizer, CsvStorage, NormalizedBatch};
use anyhow::Result;

use crate::engine::{BacktestResults, ForecastBacktest};

/// Reads and normalizes one table.
///
/// # Errors
/// Returns an error if the file cannot be read, a required column is
/// missing, or a row is malformed under the abort policy.
pub fn load_dataset(
    config: &AppConfig,
    normalizer: &BookingNormalizer,
    dataset: Dataset,
) -> Result<NormalizedBatch> {
    let path = match dataset {
        Dataset::Training => &config.data.training_path,
        Dataset::Validation => &config.data.validation_path,
    };

    let records = CsvStorage::read_bookings(
        path,
        dataset,
        &required_columns(dataset, config.evaluation.ground_truth),
    )?;
    let batch = normalizer.normalize(dataset, &records)?;

    if batch.rejected > 0 {
        tracing::warn!(%dataset, rejected = batch.rejected, path = %path, "Rows skipped");
    }
    Ok(batch)
}

/// Loads both datasets and runs the backtest.
///
/// # Errors
/// Returns an error if a file cannot be read, a required column is missing,
/// a row is malformed under the abort policy, or the benchmark is zero.
pub fn run_from_files(config: &AppConfig) -> Result<BacktestResults> {
    let normalizer = BookingNormalizer::from_config(config);

    let training = load_dataset(config, &normalizer, Dataset::Training)?;
    let validation = load_dataset(config, &normalizer, Dataset::Validation)?;

    let results = ForecastBacktest::from_config(&config.evaluation)
        .run(&training.observations, &validation.observations)?;

    Ok(results)
}
