//! Aggregate statistics used to build the model tables.
//!
//! Provides the median and mean aggregates over grouped booking values and
//! the decimal rounding applied to normalized scores.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Median of a set of values.
///
/// For an even number of values the result is the mean of the two middle
/// values. NaN values are ignored.
///
/// # Returns
/// `None` when there are no finite values.
///
/// # Examples
/// ```
/// use airline_forecast_core::stats::median;
///
/// assert_eq!(median(&[100.0, 120.0, 110.0]), Some(110.0));
/// assert_eq!(median(&[100.0, 120.0]), Some(110.0));
/// assert_eq!(median(&[]), None);
/// ```
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean of a set of values, ignoring NaN.
///
/// # Returns
/// `None` when there are no finite values.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    Some(sum / count)
}

/// Rounds a value to `decimals` places, half to even.
///
/// The exact binary value of the float is rounded, so `2.675` (stored just
/// below) rounds to `2.67`. Values that do not fit a `Decimal` fall back to
/// float rounding.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| {
            let scale = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
            (value * scale).round() / scale
        })
}
