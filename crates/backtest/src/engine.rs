//! Forecast backtest engine.
//!
//! Runs the full evaluation for one (training, validation) pair:
//!
//! 1. Resolve final demand on the training set
//! 2. Resolve (or read) ground truth on the validation set
//! 3. Compute the naive benchmark once
//! 4. Train Flat, Additive and Multiplicative models and forecast
//! 5. Score every model against the same benchmark
//!
//! The engine holds no state between runs; the same inputs always produce
//! identical results.

use airline_forecast_core::{
    BookingObservation, Dataset, EvaluationConfig, ForecastError, ForecastModel, ForecastTable,
    GroundTruth, ModelEvaluation, ModelKind, ModelScore, ResolvedObservation,
};
use airline_forecast_data::FinalDemandResolver;
use serde::{Deserialize, Serialize};

use crate::benchmark::Benchmark;
use crate::metrics::AccuracyEvaluator;
use crate::models::{AdditiveModel, FlatModel, MultiplicativeModel};

/// Output of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResults {
    pub benchmark: Benchmark,
    /// One entry per model, in `ModelKind::ALL` order.
    pub evaluations: Vec<ModelEvaluation>,
    pub training_rows: usize,
    pub validation_rows: usize,
}

impl BacktestResults {
    #[must_use]
    pub fn evaluation(&self, model: ModelKind) -> Option<&ModelEvaluation> {
        self.evaluations.iter().find(|e| e.score.model == model)
    }

    #[must_use]
    pub fn score(&self, model: ModelKind) -> Option<&ModelScore> {
        self.evaluation(model).map(|e| &e.score)
    }

    #[must_use]
    pub fn table(&self, model: ModelKind) -> Option<&ForecastTable> {
        self.evaluation(model).map(|e| &e.table)
    }
}

pub struct ForecastBacktest {
    ground_truth: GroundTruth,
    evaluator: AccuracyEvaluator,
}

impl ForecastBacktest {
    #[must_use]
    pub fn new(ground_truth: GroundTruth, score_decimals: u32) -> Self {
        Self {
            ground_truth,
            evaluator: AccuracyEvaluator::new(score_decimals),
        }
    }

    #[must_use]
    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self::new(config.ground_truth, config.score_decimals)
    }

    /// Runs the backtest on normalized observations.
    ///
    /// # Errors
    /// Returns `ForecastError::ZeroBenchmark` if the naive forecast has no
    /// error, or `ForecastError::Schema` if ground truth is read from the
    /// file and a validation row lacks it.
    pub fn run(
        &self,
        training: &[BookingObservation],
        validation: &[BookingObservation],
    ) -> Result<BacktestResults, ForecastError> {
        let training = FinalDemandResolver::resolve(Dataset::Training, training);
        let validation = match self.ground_truth {
            GroundTruth::Resolved => FinalDemandResolver::resolve(Dataset::Validation, validation),
            GroundTruth::Provided => FinalDemandResolver::from_reported(Dataset::Validation, validation)?,
        };

        self.run_resolved(&training, &validation)
    }

    /// Runs the backtest on rows whose final demand is already attached.
    ///
    /// # Errors
    /// Returns `ForecastError::ZeroBenchmark` if the naive forecast has no
    /// error.
    pub fn run_resolved(
        &self,
        training: &[ResolvedObservation],
        validation: &[ResolvedObservation],
    ) -> Result<BacktestResults, ForecastError> {
        tracing::info!(
            training_rows = training.len(),
            validation_rows = validation.len(),
            ground_truth = ?self.ground_truth,
            "Running forecast backtest"
        );

        let benchmark = Benchmark::from_validation(validation)?;

        let evaluations = Self::train_models(training)
            .iter()
            .map(|model| {
                let table = model.forecast(validation);
                tracing::debug!(model = model.name(), rows = table.rows.len(), "Forecast produced");
                let score = self.evaluator.score(&table, &benchmark);
                ModelEvaluation { score, table }
            })
            .collect();

        Ok(BacktestResults {
            benchmark,
            evaluations,
            training_rows: training.len(),
            validation_rows: validation.len(),
        })
    }

    /// Trains every model, in reporting order.
    #[must_use]
    pub fn train_models(training: &[ResolvedObservation]) -> Vec<Box<dyn ForecastModel>> {
        vec![
            Box::new(FlatModel::train(training)),
            Box::new(AdditiveModel::train(training)),
            Box::new(MultiplicativeModel::train(training)),
        ]
    }
}

impl Default for ForecastBacktest {
    fn default() -> Self {
        Self::from_config(&EvaluationConfig::default())
    }
}
