//! Forecast output records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three forecasting heuristics, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Median final demand per departure weekday.
    Flat,
    /// On-the-books plus median remaining demand.
    Additive,
    /// On-the-books divided by mean booking-completion ratio.
    Multiplicative,
}

impl ModelKind {
    /// All models in the order they are run and reported.
    pub const ALL: [ModelKind; 3] = [ModelKind::Flat, ModelKind::Additive, ModelKind::Multiplicative];

    /// Human-readable model name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Flat => "Flat",
            ModelKind::Additive => "Additive",
            ModelKind::Multiplicative => "Multiplicative",
        }
    }

    /// Lowercase identifier used for file names.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            ModelKind::Flat => "flat",
            ModelKind::Additive => "additive",
            ModelKind::Multiplicative => "multiplicative",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a model's forecast table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub departure_date: NaiveDate,
    pub booking_date: NaiveDate,
    /// Forecast final demand; `None` when the flight is already fully booked
    /// or the model cannot divide through.
    pub forecast_demand: Option<f64>,
    /// Ground-truth final demand the forecast is scored against.
    #[serde(skip_serializing, default)]
    pub actual_demand: u32,
}

impl ForecastRow {
    /// Absolute error against ground truth, `None` for a missing forecast.
    #[must_use]
    pub fn abs_error(&self) -> Option<f64> {
        self.forecast_demand
            .map(|forecast| (f64::from(self.actual_demand) - forecast).abs())
    }
}

/// A model's forecasts for the validation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    pub model: ModelKind,
    pub rows: Vec<ForecastRow>,
    /// Validation rows dropped because no aggregate matched their key.
    pub join_misses: usize,
}

impl ForecastTable {
    #[must_use]
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            rows: Vec::new(),
            join_misses: 0,
        }
    }

    /// Number of rows with a forecast value.
    #[must_use]
    pub fn forecast_count(&self) -> usize {
        self.rows.iter().filter(|r| r.forecast_demand.is_some()).count()
    }

    /// Number of rows whose forecast is missing.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.rows.len() - self.forecast_count()
    }
}

/// Normalized accuracy of one model against the naive benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub model: ModelKind,
    /// `100 * total_error / benchmark`, rounded.
    pub score: f64,
    /// Sum of absolute errors over rows with a forecast.
    pub total_error: f64,
    /// Sum of absolute naive-forecast errors shared by every model.
    pub benchmark: f64,
    pub forecast_rows: usize,
    pub missing_forecasts: usize,
    pub join_misses: usize,
}

/// A model's forecast table together with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub score: ModelScore,
    pub table: ForecastTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(forecast: Option<f64>, actual: u32) -> ForecastRow {
        ForecastRow {
            departure_date: NaiveDate::from_ymd_opt(2017, 3, 20).unwrap(),
            booking_date: NaiveDate::from_ymd_opt(2017, 3, 13).unwrap(),
            forecast_demand: forecast,
            actual_demand: actual,
        }
    }

    #[test]
    fn model_order_is_flat_additive_multiplicative() {
        let names: Vec<&str> = ModelKind::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Flat", "Additive", "Multiplicative"]);
    }

    #[test]
    fn abs_error_ignores_missing_forecast() {
        assert_eq!(row(Some(115.0), 110).abs_error(), Some(5.0));
        assert_eq!(row(Some(100.5), 110).abs_error(), Some(9.5));
        assert_eq!(row(None, 110).abs_error(), None);
    }

    #[test]
    fn table_counts_missing_rows() {
        let mut table = ForecastTable::new(ModelKind::Additive);
        table.rows.push(row(Some(115.0), 110));
        table.rows.push(row(None, 110));
        table.rows.push(row(None, 110));
        assert_eq!(table.forecast_count(), 1);
        assert_eq!(table.missing_count(), 2);
    }

    #[test]
    fn forecast_row_serializes_without_ground_truth() {
        let json = serde_json::to_string(&row(None, 110)).unwrap();
        assert_eq!(
            json,
            r#"{"departure_date":"2017-03-20","booking_date":"2017-03-13","forecast_demand":null}"#
        );
    }
}
