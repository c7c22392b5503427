//! Booking record normalization.
//!
//! Turns raw CSV rows into typed `BookingObservation`s, deriving
//! `days_prior` and `week_day`. The same normalizer must be applied to the
//! training and validation tables so that their aggregate keys line up.

use crate::models::BookingRecord;
use airline_forecast_core::{
    AppConfig, BookingObservation, Dataset, ForecastError, GroundTruth, MalformedRecordPolicy,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp layouts accepted after the configured date formats fail.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Result of normalizing one table.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub observations: Vec<BookingObservation>,
    /// Rows dropped under `MalformedRecordPolicy::Skip`.
    pub rejected: usize,
}

#[derive(Debug, Clone)]
pub struct BookingNormalizer {
    date_formats: Vec<String>,
    policy: MalformedRecordPolicy,
    require_final_demand: bool,
}

impl BookingNormalizer {
    #[must_use]
    pub fn new(date_formats: Vec<String>, policy: MalformedRecordPolicy) -> Self {
        Self {
            date_formats,
            policy,
            require_final_demand: false,
        }
    }

    /// Builds a normalizer from the `data` and `evaluation` config sections.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.data.date_formats.clone(),
            config.evaluation.malformed_records,
        )
        .with_required_final_demand(config.evaluation.ground_truth == GroundTruth::Provided)
    }

    /// Requires validation rows to carry a `final_demand` value.
    #[must_use]
    pub fn with_required_final_demand(mut self, required: bool) -> Self {
        self.require_final_demand = required;
        self
    }

    /// Normalizes every record of a table.
    ///
    /// # Errors
    /// Under `MalformedRecordPolicy::Abort`, returns the first
    /// `ForecastError::MalformedRecord`. Under `Skip` bad rows are logged and
    /// counted instead.
    pub fn normalize(
        &self,
        dataset: Dataset,
        records: &[BookingRecord],
    ) -> Result<NormalizedBatch, ForecastError> {
        let mut observations = Vec::with_capacity(records.len());
        let mut rejected = 0;

        for record in records {
            match self.normalize_record(dataset, record) {
                Ok(observation) => observations.push(observation),
                Err(err) => match self.policy {
                    MalformedRecordPolicy::Abort => return Err(err),
                    MalformedRecordPolicy::Skip => {
                        tracing::warn!(%dataset, "Skipping row: {}", err);
                        rejected += 1;
                    }
                },
            }
        }

        tracing::info!(
            %dataset,
            rows = observations.len(),
            rejected,
            "Normalized booking records"
        );

        Ok(NormalizedBatch {
            observations,
            rejected,
        })
    }

    /// Normalizes a single record.
    ///
    /// # Errors
    /// Returns `ForecastError::MalformedRecord` if the row could not be read
    /// from its file, if a date or count cannot be parsed, if the booking
    /// date falls after departure, or if a validation row lacks its naive
    /// forecast.
    pub fn normalize_record(
        &self,
        dataset: Dataset,
        record: &BookingRecord,
    ) -> Result<BookingObservation, ForecastError> {
        let line = record.line;
        if let Some(defect) = &record.defect {
            return Err(ForecastError::malformed(dataset, line, defect.clone()));
        }

        let departure_date = self.parse_date(dataset, line, "departure_date", &record.departure_date)?;
        let booking_date = self.parse_date(dataset, line, "booking_date", &record.booking_date)?;

        if departure_date < booking_date {
            return Err(ForecastError::malformed(
                dataset,
                line,
                format!("booking_date {booking_date} is after departure_date {departure_date}"),
            ));
        }

        let cum_bookings = parse_count(dataset, line, "cum_bookings", &record.cum_bookings)?;
        let mut observation = BookingObservation::new(departure_date, booking_date, cum_bookings);

        if dataset == Dataset::Validation {
            let naive = record
                .naive_forecast
                .as_deref()
                .ok_or_else(|| ForecastError::malformed(dataset, line, "naive_forecast is empty"))?;
            observation = observation.with_naive_forecast(parse_demand(dataset, line, naive)?);

            // final_demand is only read when ground truth comes from the file
            if self.require_final_demand {
                let value = record
                    .final_demand
                    .as_deref()
                    .ok_or_else(|| ForecastError::malformed(dataset, line, "final_demand is empty"))?;
                let final_demand = parse_count(dataset, line, "final_demand", value)?;
                observation = observation.with_reported_final_demand(final_demand);
            }
        }

        Ok(observation)
    }

    fn parse_date(
        &self,
        dataset: Dataset,
        line: u64,
        column: &str,
        value: &str,
    ) -> Result<NaiveDate, ForecastError> {
        let value = value.trim();

        self.date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                    .map(|ts| ts.date())
            })
            .ok_or_else(|| {
                ForecastError::malformed(dataset, line, format!("unparseable {column} '{value}'"))
            })
    }
}

/// Parses a non-negative integer count. Integral floats such as `"80.0"`
/// are accepted.
fn parse_count(dataset: Dataset, line: u64, column: &str, value: &str) -> Result<u32, ForecastError> {
    let value = value.trim();
    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }

    match value.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = v as u32;
            Ok(count)
        }
        _ => Err(ForecastError::malformed(
            dataset,
            line,
            format!("{column} '{value}' is not a non-negative integer"),
        )),
    }
}

fn parse_demand(dataset: Dataset, line: u64, value: &str) -> Result<f64, ForecastError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ForecastError::malformed(
            dataset,
            line,
            format!("naive_forecast '{}' is not a non-negative number", value.trim()),
        )),
    }
}
