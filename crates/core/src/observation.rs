//! Booking-curve observations.
//!
//! A `BookingObservation` is one normalized reading of a flight's cumulative
//! bookings. Once the final demand of its departure is known it becomes a
//! `ResolvedObservation`, which is what the models train on and score against.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One normalized reading on a booking curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingObservation {
    /// Date the flight departs.
    pub departure_date: NaiveDate,
    /// Date the reading was taken (never after `departure_date`).
    pub booking_date: NaiveDate,
    /// Cumulative bookings on hand as of `booking_date`.
    pub cum_bookings: u32,
    /// Whole days between `booking_date` and `departure_date`.
    pub days_prior: i64,
    /// Weekday of `departure_date`.
    pub week_day: Weekday,
    /// Naive forecast of final demand (validation rows only).
    pub naive_forecast: Option<f64>,
    /// Final demand reported by the input file, when it carries one.
    pub reported_final_demand: Option<u32>,
}

impl BookingObservation {
    /// Creates an observation and derives `days_prior` and `week_day`.
    #[must_use]
    pub fn new(departure_date: NaiveDate, booking_date: NaiveDate, cum_bookings: u32) -> Self {
        Self {
            departure_date,
            booking_date,
            cum_bookings,
            days_prior: (departure_date - booking_date).num_days(),
            week_day: departure_date.weekday(),
            naive_forecast: None,
            reported_final_demand: None,
        }
    }

    /// Attaches the naive forecast supplied with a validation row.
    #[must_use]
    pub fn with_naive_forecast(mut self, naive_forecast: f64) -> Self {
        self.naive_forecast = Some(naive_forecast);
        self
    }

    /// Attaches a final demand read from the input file.
    #[must_use]
    pub fn with_reported_final_demand(mut self, final_demand: u32) -> Self {
        self.reported_final_demand = Some(final_demand);
        self
    }
}

/// An observation paired with the final demand of its departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedObservation {
    #[serde(flatten)]
    pub observation: BookingObservation,
    /// Total demand the flight reached.
    pub final_demand: u32,
}

impl ResolvedObservation {
    #[must_use]
    pub fn new(observation: BookingObservation, final_demand: u32) -> Self {
        Self {
            observation,
            final_demand,
        }
    }

    /// Bookings still to come after this reading.
    #[must_use]
    pub fn remaining_demand(&self) -> i64 {
        i64::from(self.final_demand) - i64::from(self.observation.cum_bookings)
    }

    /// Share of final demand already booked, or `None` when the flight
    /// ended with zero demand.
    #[must_use]
    pub fn booking_ratio(&self) -> Option<f64> {
        if self.final_demand == 0 {
            return None;
        }
        Some(f64::from(self.observation.cum_bookings) / f64::from(self.final_demand))
    }

    /// True once the reading already equals final demand; no forecast is
    /// produced for such rows.
    #[must_use]
    pub fn is_fully_booked(&self) -> bool {
        self.observation.cum_bookings == self.final_demand
    }
}

/// Full English name of a weekday, e.g. `"Monday"`.
#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
