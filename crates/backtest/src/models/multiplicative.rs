//! Multiplicative model: forecast = on-the-books / mean booking ratio.
//!
//! The booking ratio `cum_bookings / final_demand` is averaged per days
//! prior only, so it pools every weekday. Training rows of flights that
//! ended with zero demand have no ratio and are left out of the mean.

use airline_forecast_core::{
    mean, ForecastModel, ForecastRow, ForecastTable, ModelKind, ResolvedObservation,
};
use std::collections::HashMap;

use super::group_values;

#[derive(Debug, Clone, PartialEq)]
pub struct MultiplicativeModel {
    booking_ratio: HashMap<i64, f64>,
}

impl MultiplicativeModel {
    #[must_use]
    pub fn train(training: &[ResolvedObservation]) -> Self {
        let groups = group_values(training, |row| {
            row.booking_ratio()
                .map(|ratio| (row.observation.days_prior, ratio))
        });

        let booking_ratio: HashMap<i64, f64> = groups
            .into_iter()
            .filter_map(|(days_prior, ratios)| mean(&ratios).map(|m| (days_prior, m)))
            .collect();

        tracing::debug!(keys = booking_ratio.len(), "Trained multiplicative model");
        Self { booking_ratio }
    }

    /// Mean booking-completion ratio at a days-prior bucket.
    #[must_use]
    pub fn booking_ratio(&self, days_prior: i64) -> Option<f64> {
        self.booking_ratio.get(&days_prior).copied()
    }
}

impl ForecastModel for MultiplicativeModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Multiplicative
    }

    /// Rows are returned sorted by (departure_date, booking_date). A zero
    /// ratio cannot be divided through and yields a missing forecast.
    fn forecast(&self, validation: &[ResolvedObservation]) -> ForecastTable {
        let mut table = ForecastTable::new(ModelKind::Multiplicative);

        for row in validation {
            let obs = &row.observation;
            let Some(ratio) = self.booking_ratio(obs.days_prior) else {
                table.join_misses += 1;
                continue;
            };

            let forecast_demand = if row.is_fully_booked() || ratio == 0.0 {
                None
            } else {
                Some(f64::from(obs.cum_bookings) / ratio)
            };

            table.rows.push(ForecastRow {
                departure_date: obs.departure_date,
                booking_date: obs.booking_date,
                forecast_demand,
                actual_demand: row.final_demand,
            });
        }

        table
            .rows
            .sort_by_key(|r| (r.departure_date, r.booking_date));

        tracing::debug!(
            rows = table.rows.len(),
            join_misses = table.join_misses,
            "Multiplicative forecast complete"
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{obs, training, validation};
    use airline_forecast_core::Dataset;
    use airline_forecast_data::FinalDemandResolver;

    #[test]
    fn mean_ratio_per_days_prior() {
        let model = MultiplicativeModel::train(&training());

        let expected = (0.7 + 80.0 / 120.0) / 2.0;
        assert!((model.booking_ratio(7).unwrap() - expected).abs() < 1e-12);
        assert_eq!(model.booking_ratio(0), Some(1.0));
        assert_eq!(model.booking_ratio(21), None);
    }

    #[test]
    fn zero_demand_flights_are_excluded_from_mean() {
        let mut rows = crate::test_support::training_observations();
        // a Wednesday flight that never sold a seat
        rows.push(obs((3, 8), (3, 1), 0));
        rows.push(obs((3, 8), (3, 8), 0));
        let training = FinalDemandResolver::resolve(Dataset::Training, &rows);

        let model = MultiplicativeModel::train(&training);
        let expected = (0.7 + 80.0 / 120.0) / 2.0;
        assert!((model.booking_ratio(7).unwrap() - expected).abs() < 1e-12);
        assert_eq!(model.booking_ratio(0), Some(1.0));
    }

    #[test]
    fn forecast_times_ratio_recovers_bookings_on_hand() {
        let model = MultiplicativeModel::train(&training());
        let table = model.forecast(&validation());

        let forecast = table.rows[0].forecast_demand.unwrap();
        assert!((forecast - 117.073_170_731_707).abs() < 1e-9, "forecast was {forecast}");
        assert!((forecast * model.booking_ratio(7).unwrap() - 80.0).abs() < 1e-9);
        assert_eq!(table.rows[1].forecast_demand, None);
    }

    #[test]
    fn zero_ratio_yields_missing_forecast() {
        // every flight had zero bookings 14 days out
        let rows = vec![obs((3, 6), (2, 20), 0), obs((3, 6), (3, 6), 50)];
        let training = FinalDemandResolver::resolve(Dataset::Training, &rows);
        let model = MultiplicativeModel::train(&training);
        assert_eq!(model.booking_ratio(14), Some(0.0));

        let validation = FinalDemandResolver::resolve(
            Dataset::Validation,
            &[obs((3, 20), (3, 6), 0), obs((3, 20), (3, 20), 40)],
        );
        let table = model.forecast(&validation);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].forecast_demand, None);
    }

    #[test]
    fn matches_on_days_prior_across_weekdays() {
        // Tuesday departure still finds the pooled 7-day ratio
        let rows = vec![obs((3, 21), (3, 14), 60), obs((3, 21), (3, 21), 90)];
        let resolved = FinalDemandResolver::resolve(Dataset::Validation, &rows);
        let table = MultiplicativeModel::train(&training()).forecast(&resolved);

        assert_eq!(table.join_misses, 0);
        assert!(table.rows[0].forecast_demand.is_some());
    }

    #[test]
    fn output_sorted_by_departure_then_booking_date() {
        let rows = vec![
            obs((3, 27), (3, 20), 60),
            obs((3, 20), (3, 20), 110),
            obs((3, 27), (3, 13), 30),
            obs((3, 20), (3, 13), 80),
        ];
        let resolved = FinalDemandResolver::resolve(Dataset::Validation, &rows);
        let table = MultiplicativeModel::train(&training()).forecast(&resolved);

        let keys: Vec<_> = table
            .rows
            .iter()
            .map(|r| (r.departure_date, r.booking_date))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 4);
    }
}
