//! Inconsistency detection across files.
//!
//! A variable is inconsistent for a kind when its grouped values are not all
//! equal to the first one under that kind's equality. Variables that are not
//! keys of a kind's grouping get no flag entry at all, which is different
//! from being flagged consistent: there was nothing to compare.

use std::collections::BTreeMap;

use tracing::debug;
use wave_model::{MetadataKind, ValueLabels};

use crate::group::{Grouped, GroupedMetadata};

/// Variable name to `true` (inconsistent) or `false` (consistent).
pub type Flags = BTreeMap<String, bool>;

/// Flags every keyed variable of `grouped`.
///
/// Zero values: no entry. One value: consistent. Two or more: inconsistent
/// iff some value differs from the first under `equal`.
pub fn detect<V, F>(grouped: &Grouped<V>, equal: F) -> Flags
where
    F: Fn(&V, &V) -> bool,
{
    let mut flags = Flags::new();
    for (variable, values) in grouped {
        let Some((first, rest)) = values.split_first() else {
            continue;
        };
        let inconsistent = rest.iter().any(|value| !equal(first, value));
        flags.insert(variable.clone(), inconsistent);
    }
    flags
}

/// Value-label mappings are equal iff their canonical forms are identical.
pub fn value_labels_equal(left: &ValueLabels, right: &ValueLabels) -> bool {
    left.canonical() == right.canonical()
}

/// Flags for every metadata kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InconsistencyFlags {
    by_kind: BTreeMap<MetadataKind, Flags>,
}

impl InconsistencyFlags {
    pub fn detect_all(grouped: &GroupedMetadata) -> Self {
        let mut by_kind = BTreeMap::new();
        by_kind.insert(MetadataKind::Label, detect(&grouped.labels, String::eq));
        by_kind.insert(
            MetadataKind::ValueLabels,
            detect(&grouped.value_labels, value_labels_equal),
        );
        by_kind.insert(
            MetadataKind::MeasurementLevel,
            detect(&grouped.measures, PartialEq::eq),
        );
        by_kind.insert(
            MetadataKind::DisplayWidth,
            detect(&grouped.display_widths, PartialEq::eq),
        );
        by_kind.insert(
            MetadataKind::VariableType,
            detect(&grouped.variable_types, String::eq),
        );
        by_kind.insert(
            MetadataKind::MissingRanges,
            detect(&grouped.missing_ranges, PartialEq::eq),
        );
        let flags = Self { by_kind };
        for kind in MetadataKind::ALL {
            debug!(
                kind = %kind,
                inconsistent = flags.inconsistent_count(kind),
                "inconsistencies detected"
            );
        }
        flags
    }

    pub fn for_kind(&self, kind: MetadataKind) -> Option<&Flags> {
        self.by_kind.get(&kind)
    }

    /// `None` when the variable has no entry for `kind`.
    pub fn flag(&self, kind: MetadataKind, variable: &str) -> Option<bool> {
        self.by_kind
            .get(&kind)
            .and_then(|flags| flags.get(variable))
            .copied()
    }

    /// Every kind that has an entry for `variable`.
    pub fn flags_for(&self, variable: &str) -> BTreeMap<MetadataKind, bool> {
        self.by_kind
            .iter()
            .filter_map(|(kind, flags)| flags.get(variable).map(|flag| (*kind, *flag)))
            .collect()
    }

    pub fn inconsistent_count(&self, kind: MetadataKind) -> usize {
        self.by_kind
            .get(&kind)
            .map_or(0, |flags| flags.values().filter(|flag| **flag).count())
    }
}
