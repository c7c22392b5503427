//! Core types, traits, and configuration for airline booking-curve forecasting.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod forecast;
pub mod metrics_formatter;
pub mod observation;
pub mod stats;
pub mod traits;

pub use config::{
    AppConfig, DataConfig, EvaluationConfig, GroundTruth, MalformedRecordPolicy, OutputConfig,
};
pub use config_loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use error::{Dataset, ForecastError};
pub use forecast::{ForecastRow, ForecastTable, ModelEvaluation, ModelKind, ModelScore};
pub use metrics_formatter::MetricsFormatter;
pub use observation::{weekday_name, BookingObservation, ResolvedObservation};
pub use stats::{mean, median, round_to};
pub use traits::ForecastModel;
