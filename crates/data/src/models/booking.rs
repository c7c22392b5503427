//! Raw booking rows as read from CSV.

use airline_forecast_core::{Dataset, GroundTruth};
use serde::{Deserialize, Serialize};

pub const DEPARTURE_DATE: &str = "departure_date";
pub const BOOKING_DATE: &str = "booking_date";
pub const CUM_BOOKINGS: &str = "cum_bookings";
pub const NAIVE_FORECAST: &str = "naive_forecast";
pub const FINAL_DEMAND: &str = "final_demand";

/// One unparsed row of a booking-curve table.
///
/// Every cell is kept as text so that parse failures can be reported as
/// malformed records with their line number rather than as CSV errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// 1-based line in the source file (0 when built in memory).
    #[serde(skip)]
    pub line: u64,
    pub departure_date: String,
    pub booking_date: String,
    pub cum_bookings: String,
    #[serde(default)]
    pub naive_forecast: Option<String>,
    #[serde(default)]
    pub final_demand: Option<String>,
    /// Why the row could not be read into cells, if it could not.
    #[serde(skip)]
    pub defect: Option<String>,
}

impl BookingRecord {
    /// Builds a training-style record in memory.
    #[must_use]
    pub fn new(departure_date: &str, booking_date: &str, cum_bookings: &str) -> Self {
        Self {
            line: 0,
            departure_date: departure_date.to_string(),
            booking_date: booking_date.to_string(),
            cum_bookings: cum_bookings.to_string(),
            naive_forecast: None,
            final_demand: None,
            defect: None,
        }
    }

    /// A row whose cells could not be read; normalizing it yields a
    /// malformed-record error carrying `reason`.
    #[must_use]
    pub fn unreadable(line: u64, reason: impl Into<String>) -> Self {
        Self {
            line,
            defect: Some(reason.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_naive_forecast(mut self, naive_forecast: &str) -> Self {
        self.naive_forecast = Some(naive_forecast.to_string());
        self
    }

    #[must_use]
    pub fn with_final_demand(mut self, final_demand: &str) -> Self {
        self.final_demand = Some(final_demand.to_string());
        self
    }

    #[must_use]
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }
}

/// Columns an input table must carry.
///
/// Training tables need the three curve columns. Validation tables also need
/// `naive_forecast`, and `final_demand` when ground truth is read from the
/// file rather than resolved.
#[must_use]
pub fn required_columns(dataset: Dataset, ground_truth: GroundTruth) -> Vec<&'static str> {
    let mut columns = vec![DEPARTURE_DATE, BOOKING_DATE, CUM_BOOKINGS];
    if dataset == Dataset::Validation {
        columns.push(NAIVE_FORECAST);
        if ground_truth == GroundTruth::Provided {
            columns.push(FINAL_DEMAND);
        }
    }
    columns
}
