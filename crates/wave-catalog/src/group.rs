//! Per-variable grouping of metadata values across files.
//!
//! Each metadata kind is grouped independently: a variable may have display
//! widths in every file and a label in none. A variable only becomes a key of
//! a kind's grouping once some file contributed a value of that kind, which
//! is what later decides whether the detector examines it at all.

use std::collections::BTreeMap;

use tracing::debug;
use wave_model::{FileId, FileMetadata, MeasureLevel, MetadataKind, MissingRange, ValueLabels};

use crate::index::VariableIndex;

/// Variable name to the values contributed by each file, in processing order.
pub type Grouped<V> = BTreeMap<String, Vec<V>>;

/// Groups one metadata kind across files.
///
/// `per_file` yields each file's kind mapping in processing order. A value is
/// kept only when `eligible` lists its file among the variable's appearances,
/// so a file never contributes to a variable it does not carry.
pub fn group<'a, V, I>(kind: MetadataKind, per_file: I, eligible: &VariableIndex) -> Grouped<V>
where
    V: Clone + 'a,
    I: IntoIterator<Item = (&'a FileId, &'a BTreeMap<String, V>)>,
{
    let mut grouped: Grouped<V> = BTreeMap::new();
    let mut skipped = 0usize;
    for (file, mapping) in per_file {
        for (variable, value) in mapping {
            let carried = eligible
                .appearances_of(variable)
                .is_some_and(|files| files.contains(file));
            if !carried {
                skipped += 1;
                continue;
            }
            grouped
                .entry(variable.clone())
                .or_default()
                .push(value.clone());
        }
    }
    debug!(
        kind = %kind,
        variable_count = grouped.len(),
        skipped,
        "metadata grouped"
    );
    grouped
}

/// All metadata kinds grouped by variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedMetadata {
    pub labels: Grouped<String>,
    pub value_labels: Grouped<ValueLabels>,
    pub measures: Grouped<MeasureLevel>,
    pub display_widths: Grouped<u32>,
    pub variable_types: Grouped<String>,
    pub missing_ranges: Grouped<Vec<MissingRange>>,
}

impl GroupedMetadata {
    pub fn build(files: &[FileMetadata], index: &VariableIndex) -> Self {
        Self {
            labels: group(
                MetadataKind::Label,
                files.iter().map(|file| (&file.file, &file.labels)),
                index,
            ),
            value_labels: group(
                MetadataKind::ValueLabels,
                files.iter().map(|file| (&file.file, &file.value_labels)),
                index,
            ),
            measures: group(
                MetadataKind::MeasurementLevel,
                files.iter().map(|file| (&file.file, &file.measures)),
                index,
            ),
            display_widths: group(
                MetadataKind::DisplayWidth,
                files.iter().map(|file| (&file.file, &file.display_widths)),
                index,
            ),
            variable_types: group(
                MetadataKind::VariableType,
                files.iter().map(|file| (&file.file, &file.variable_types)),
                index,
            ),
            missing_ranges: group(
                MetadataKind::MissingRanges,
                files.iter().map(|file| (&file.file, &file.missing_ranges)),
                index,
            ),
        }
    }

    /// Number of values recorded for `variable` under `kind`.
    pub fn value_count(&self, kind: MetadataKind, variable: &str) -> usize {
        match kind {
            MetadataKind::Label => len_of(&self.labels, variable),
            MetadataKind::ValueLabels => len_of(&self.value_labels, variable),
            MetadataKind::MeasurementLevel => len_of(&self.measures, variable),
            MetadataKind::DisplayWidth => len_of(&self.display_widths, variable),
            MetadataKind::VariableType => len_of(&self.variable_types, variable),
            MetadataKind::MissingRanges => len_of(&self.missing_ranges, variable),
        }
    }

    /// Whether `variable` is a key of the grouping for `kind`.
    pub fn has_values(&self, kind: MetadataKind, variable: &str) -> bool {
        self.value_count(kind, variable) > 0
    }
}

fn len_of<V>(grouped: &Grouped<V>, variable: &str) -> usize {
    grouped.get(variable).map_or(0, Vec::len)
}
