//! Final-demand resolution.
//!
//! Final demand is the maximum cumulative bookings observed for a departure
//! date. Rows are grouped by departure into `FlightCurve`s, each curve is
//! folded to its maximum, and that value is joined back onto every row of
//! the curve. Training and validation tables are resolved independently.
//!
//! The maximum only reaches true final demand if the data runs up to
//! departure; a curve cut off earlier undercounts.

use airline_forecast_core::{BookingObservation, Dataset, ForecastError, ResolvedObservation};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// All readings for one departure date, ordered by booking date.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightCurve {
    pub departure_date: NaiveDate,
    pub readings: Vec<BookingObservation>,
}

impl FlightCurve {
    /// Maximum cumulative bookings on the curve.
    #[must_use]
    pub fn final_demand(&self) -> u32 {
        self.readings
            .iter()
            .map(|r| r.cum_bookings)
            .max()
            .unwrap_or(0)
    }

    /// True when cumulative bookings never drop as booking date advances.
    #[must_use]
    pub fn is_non_decreasing(&self) -> bool {
        self.readings
            .windows(2)
            .all(|pair| pair[0].cum_bookings <= pair[1].cum_bookings)
    }
}

/// Groups observations into curves keyed by departure date.
#[must_use]
pub fn group_curves(observations: &[BookingObservation]) -> BTreeMap<NaiveDate, FlightCurve> {
    let mut curves: BTreeMap<NaiveDate, FlightCurve> = BTreeMap::new();

    for obs in observations {
        curves
            .entry(obs.departure_date)
            .or_insert_with(|| FlightCurve {
                departure_date: obs.departure_date,
                readings: Vec::new(),
            })
            .readings
            .push(obs.clone());
    }

    for curve in curves.values_mut() {
        curve.readings.sort_by_key(|r| r.booking_date);
    }

    curves
}

pub struct FinalDemandResolver;

impl FinalDemandResolver {
    /// Attaches the per-departure maximum of `cum_bookings` to every row.
    ///
    /// Input order is preserved.
    #[must_use]
    pub fn resolve(dataset: Dataset, observations: &[BookingObservation]) -> Vec<ResolvedObservation> {
        let curves = group_curves(observations);

        let decreasing = curves.values().filter(|c| !c.is_non_decreasing()).count();
        if decreasing > 0 {
            tracing::warn!(
                %dataset,
                curves = decreasing,
                "Cumulative bookings decrease along some flight curves"
            );
        }

        let final_demand: HashMap<NaiveDate, u32> = curves
            .values()
            .map(|curve| (curve.departure_date, curve.final_demand()))
            .collect();

        tracing::debug!(%dataset, departures = final_demand.len(), "Resolved final demand");

        observations
            .iter()
            .map(|obs| {
                let demand = final_demand
                    .get(&obs.departure_date)
                    .copied()
                    .unwrap_or(obs.cum_bookings);
                ResolvedObservation::new(obs.clone(), demand)
            })
            .collect()
    }

    /// Uses the final demand reported on each row instead of resolving it.
    ///
    /// # Errors
    /// Returns `ForecastError::Schema` if any row lacks a reported value.
    pub fn from_reported(
        dataset: Dataset,
        observations: &[BookingObservation],
    ) -> Result<Vec<ResolvedObservation>, ForecastError> {
        observations
            .iter()
            .map(|obs| {
                obs.reported_final_demand
                    .map(|demand| ResolvedObservation::new(obs.clone(), demand))
                    .ok_or_else(|| ForecastError::Schema {
                        dataset,
                        column: "final_demand".to_string(),
                    })
            })
            .collect()
    }
}
