//! Flat model: forecast = median final demand for the departure weekday.
//!
//! On-the-books bookings cancel out of this model, so every validation row
//! departing on the same weekday gets the same forecast.

use airline_forecast_core::{
    median, weekday_name, ForecastModel, ForecastRow, ForecastTable, ModelKind,
    ResolvedObservation,
};
use chrono::Weekday;
use std::collections::HashMap;

use super::group_values;

#[derive(Debug, Clone, PartialEq)]
pub struct FlatModel {
    median_final_demand: HashMap<Weekday, f64>,
}

impl FlatModel {
    /// Builds the weekday table from resolved training rows.
    ///
    /// Every row contributes its flight's final demand, so longer curves
    /// weigh more, matching a row-wise group-by.
    #[must_use]
    pub fn train(training: &[ResolvedObservation]) -> Self {
        let groups = group_values(training, |row| {
            Some((row.observation.week_day, f64::from(row.final_demand)))
        });

        let median_final_demand: HashMap<Weekday, f64> = groups
            .into_iter()
            .filter_map(|(day, values)| median(&values).map(|m| (day, m)))
            .collect();

        tracing::debug!(weekdays = median_final_demand.len(), "Trained flat model");
        Self {
            median_final_demand,
        }
    }

    /// Median final demand for a weekday, if the training set had one.
    #[must_use]
    pub fn median_final_demand(&self, day: Weekday) -> Option<f64> {
        self.median_final_demand.get(&day).copied()
    }
}

impl ForecastModel for FlatModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Flat
    }

    fn forecast(&self, validation: &[ResolvedObservation]) -> ForecastTable {
        let mut table = ForecastTable::new(ModelKind::Flat);

        for row in validation {
            let obs = &row.observation;
            let Some(demand) = self.median_final_demand(obs.week_day) else {
                tracing::trace!(week_day = weekday_name(obs.week_day), "No flat aggregate");
                table.join_misses += 1;
                continue;
            };

            table.rows.push(ForecastRow {
                departure_date: obs.departure_date,
                booking_date: obs.booking_date,
                forecast_demand: (!row.is_fully_booked()).then_some(demand),
                actual_demand: row.final_demand,
            });
        }

        tracing::debug!(
            rows = table.rows.len(),
            join_misses = table.join_misses,
            "Flat forecast complete"
        );
        table
    }
}
