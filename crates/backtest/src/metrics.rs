use airline_forecast_core::{round_to, ForecastTable, ModelScore};

use crate::benchmark::Benchmark;

/// Scores forecast tables against the shared naive benchmark.
pub struct AccuracyEvaluator {
    decimals: u32,
}

impl AccuracyEvaluator {
    /// Creates an evaluator rounding scores to `decimals` places.
    #[must_use]
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// Computes `round(100 * sum(|error|) / benchmark, decimals)`.
    ///
    /// Missing forecasts contribute no error.
    #[must_use]
    pub fn score(&self, table: &ForecastTable, benchmark: &Benchmark) -> ModelScore {
        let total_error: f64 = table.rows.iter().filter_map(|r| r.abs_error()).sum();
        let score = round_to(100.0 * total_error / benchmark.total_abs_error, self.decimals);

        tracing::info!(
            model = %table.model,
            score,
            total_error,
            "Scored model"
        );

        ModelScore {
            model: table.model,
            score,
            total_error,
            benchmark: benchmark.total_abs_error,
            forecast_rows: table.forecast_count(),
            missing_forecasts: table.missing_count(),
            join_misses: table.join_misses,
        }
    }
}

impl Default for AccuracyEvaluator {
    fn default() -> Self {
        Self::new(2)
    }
}
