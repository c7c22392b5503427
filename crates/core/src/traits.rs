use crate::forecast::{ForecastTable, ModelKind};
use crate::observation::ResolvedObservation;

/// A forecasting heuristic trained on historical booking curves.
///
/// Implementations build their aggregate tables once from the training set
/// and are read-only afterwards, so one model can forecast any number of
/// validation sets.
pub trait ForecastModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Forecasts final demand for each validation row.
    ///
    /// Rows whose aggregate key is absent from the training tables are
    /// dropped and counted in `ForecastTable::join_misses`.
    fn forecast(&self, validation: &[ResolvedObservation]) -> ForecastTable;

    fn name(&self) -> &str {
        self.kind().name()
    }
}
