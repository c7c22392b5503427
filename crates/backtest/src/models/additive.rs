//! Additive model: forecast = on-the-books + median remaining demand.
//!
//! Remaining demand (`final_demand - cum_bookings`) is aggregated per
//! (weekday, days prior) over the training rows.

use airline_forecast_core::{
    median, ForecastModel, ForecastRow, ForecastTable, ModelKind, ResolvedObservation,
};
use chrono::Weekday;
use std::collections::HashMap;

use super::group_values;

#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveModel {
    remaining_demand: HashMap<(Weekday, i64), f64>,
}

impl AdditiveModel {
    #[must_use]
    pub fn train(training: &[ResolvedObservation]) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let groups = group_values(training, |row| {
            let key = (row.observation.week_day, row.observation.days_prior);
            Some((key, row.remaining_demand() as f64))
        });

        let remaining_demand: HashMap<(Weekday, i64), f64> = groups
            .into_iter()
            .filter_map(|(key, values)| median(&values).map(|m| (key, m)))
            .collect();

        tracing::debug!(keys = remaining_demand.len(), "Trained additive model");
        Self { remaining_demand }
    }

    /// Median remaining demand for a weekday and days-prior bucket.
    #[must_use]
    pub fn remaining_demand(&self, day: Weekday, days_prior: i64) -> Option<f64> {
        self.remaining_demand.get(&(day, days_prior)).copied()
    }
}

impl ForecastModel for AdditiveModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Additive
    }

    fn forecast(&self, validation: &[ResolvedObservation]) -> ForecastTable {
        let mut table = ForecastTable::new(ModelKind::Additive);

        for row in validation {
            let obs = &row.observation;
            let Some(remaining) = self.remaining_demand(obs.week_day, obs.days_prior) else {
                table.join_misses += 1;
                continue;
            };

            let forecast = f64::from(obs.cum_bookings) + remaining;
            table.rows.push(ForecastRow {
                departure_date: obs.departure_date,
                booking_date: obs.booking_date,
                forecast_demand: (!row.is_fully_booked()).then_some(forecast),
                actual_demand: row.final_demand,
            });
        }

        tracing::debug!(
            rows = table.rows.len(),
            join_misses = table.join_misses,
            "Additive forecast complete"
        );
        table
    }
}
