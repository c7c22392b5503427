//! Forecast models trained on historical booking curves.
//!
//! Each model reduces the training set to one explicit lookup table and
//! forecasts validation rows by exact key match:
//!
//! | model          | key                     | aggregate                    |
//! |----------------|-------------------------|------------------------------|
//! | Flat           | week_day                | median final demand          |
//! | Additive       | (week_day, days_prior)  | median remaining demand      |
//! | Multiplicative | days_prior              | mean booking-completion ratio |
//!
//! A validation row whose key is absent is dropped from that model's output
//! and counted as a join miss. Because the multiplicative key is coarser, it
//! typically misses fewer rows than the additive model.

pub mod additive;
pub mod flat;
pub mod multiplicative;

pub use additive::AdditiveModel;
pub use flat::FlatModel;
pub use multiplicative::MultiplicativeModel;

use airline_forecast_core::ResolvedObservation;
use std::collections::HashMap;
use std::hash::Hash;

/// Groups one value per training row under its key. Rows mapped to `None`
/// are left out of every group.
pub(crate) fn group_values<K, F>(rows: &[ResolvedObservation], key_value: F) -> HashMap<K, Vec<f64>>
where
    K: Eq + Hash,
    F: Fn(&ResolvedObservation) -> Option<(K, f64)>,
{
    let mut groups: HashMap<K, Vec<f64>> = HashMap::new();
    for (key, value) in rows.iter().filter_map(key_value) {
        groups.entry(key).or_default().push(value);
    }
    groups
}
