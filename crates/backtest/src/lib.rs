//! Forecast models and their scoring against a naive benchmark.

pub mod benchmark;
pub mod engine;
pub mod metrics;
pub mod models;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use benchmark::Benchmark;
pub use engine::{BacktestResults, ForecastBacktest};
pub use metrics::AccuracyEvaluator;
pub use models::{AdditiveModel, FlatModel, MultiplicativeModel};
pub use pipeline::{load_dataset, run_from_files};
