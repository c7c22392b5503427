#![allow(clippy::format_push_string)]

use crate::forecast::{ForecastTable, ModelEvaluation, ModelScore};

const MISSING: &str = "missing";

pub struct MetricsFormatter;

impl MetricsFormatter {
    /// Formats every model as a score line followed by its forecast table.
    #[must_use]
    pub fn format(evaluations: &[ModelEvaluation], decimals: u32) -> String {
        let mut output = String::new();

        for (i, evaluation) in evaluations.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&Self::format_score(&evaluation.score, decimals));
            output.push('\n');
            output.push_str(&Self::format_table(&evaluation.table, decimals));
        }

        output
    }

    /// `"<Model> forecast error: <score>"`.
    #[must_use]
    pub fn format_score(score: &ModelScore, decimals: u32) -> String {
        let precision = decimals as usize;
        format!(
            "{} forecast error: {:.precision$}",
            score.model.name(),
            score.score
        )
    }

    /// Fixed-width forecast table with forecasts at `decimals` places.
    #[must_use]
    pub fn format_table(table: &ForecastTable, decimals: u32) -> String {
        let precision = decimals as usize;
        let mut output = String::new();
        output.push_str(&format!(
            "{:<16}{:<16}{:>16}\n",
            "departure_date", "booking_date", "forecast_demand"
        ));

        for row in &table.rows {
            let forecast = row
                .forecast_demand
                .map_or_else(|| MISSING.to_string(), |value| format!("{value:.precision$}"));
            output.push_str(&format!(
                "{:<16}{:<16}{:>16}\n",
                row.departure_date.format("%Y-%m-%d").to_string(),
                row.booking_date.format("%Y-%m-%d").to_string(),
                forecast
            ));
        }

        if table.rows.is_empty() {
            output.push_str("(no rows)\n");
        }

        output
    }
}
