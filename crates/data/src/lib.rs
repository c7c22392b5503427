//! Booking-curve ingestion for the forecasting pipeline.
//!
//! This crate provides:
//! - CSV reading with schema checks and CSV export of forecast tables
//! - Normalization of raw rows into typed observations
//! - Flight-curve grouping and final-demand resolution

pub mod csv_storage;
pub mod models;
pub mod normalizer;
pub mod resolver;

pub use csv_storage::CsvStorage;
pub use models::{required_columns, BookingRecord};
pub use normalizer::{BookingNormalizer, NormalizedBatch};
pub use resolver::{group_curves, FinalDemandResolver, FlightCurve};
