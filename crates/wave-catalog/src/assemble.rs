//! Projection of index, groupings, and flags into catalog rows.
//!
//! No cross-file decisions happen here; every row is read off the structures
//! built by the earlier stages.

use std::collections::BTreeMap;

use wave_model::CatalogRow;

use crate::detect::InconsistencyFlags;
use crate::group::{Grouped, GroupedMetadata};
use crate::index::VariableIndex;

/// One row per indexed variable, in first-appearance order.
pub fn assemble(
    index: &VariableIndex,
    grouped: &GroupedMetadata,
    flags: &InconsistencyFlags,
    annotations: &BTreeMap<String, String>,
) -> Vec<CatalogRow> {
    index
        .variables()
        .iter()
        .map(|variable| CatalogRow {
            variable_name: variable.clone(),
            labels: distinct(values_of(&grouped.labels, variable)),
            value_labels: distinct_by(values_of(&grouped.value_labels, variable), |labels| {
                labels.canonical()
            }),
            measure: representative(values_of(&grouped.measures, variable)),
            display_width: representative(values_of(&grouped.display_widths, variable)),
            variable_types: distinct(values_of(&grouped.variable_types, variable)),
            missing_ranges: distinct(values_of(&grouped.missing_ranges, variable)),
            flags: flags.flags_for(variable),
            annotation: annotations.get(variable).cloned(),
            appearance_count: index.count(variable).unwrap_or_default(),
            appearances: index
                .appearances_of(variable)
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
        })
        .collect()
}

fn values_of<'a, V>(grouped: &'a Grouped<V>, variable: &str) -> &'a [V] {
    grouped.get(variable).map(Vec::as_slice).unwrap_or(&[])
}

/// The value shown for single-valued kinds: the first recorded value, which
/// comes from the earliest file in processing order. Absent when no file
/// recorded one.
pub fn representative<V: Clone>(values: &[V]) -> Option<V> {
    values.first().cloned()
}

/// Distinct values in first-seen order.
pub fn distinct<V: PartialEq + Clone>(values: &[V]) -> Vec<V> {
    let mut unique: Vec<V> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(value.clone());
        }
    }
    unique
}

/// Distinct values by `key`, keeping the first value seen for each key.
pub fn distinct_by<V, K, F>(values: &[V], key: F) -> Vec<V>
where
    V: Clone,
    K: PartialEq,
    F: Fn(&V) -> K,
{
    let mut keys: Vec<K> = Vec::with_capacity(values.len());
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        let value_key = key(value);
        if !keys.contains(&value_key) {
            keys.push(value_key);
            unique.push(value.clone());
        }
    }
    unique
}
