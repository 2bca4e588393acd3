//! Per-file variable metadata.
//!
//! One [`FileMetadata`] describes the schema of one wave: its columns in file
//! order plus one mapping per metadata kind, keyed by variable name. A file
//! may carry a column without a value for some kind (no label, no value
//! labels); those variables are simply absent from that kind's mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{FileId, MeasureLevel, MissingRange, ValueLabels};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Identifier of the wave this record was extracted from.
    pub file: FileId,
    /// Column names in file order. Unique within the file.
    pub column_names: Vec<String>,
    /// Column labels aligned with `column_names` (`None` = unlabeled).
    pub column_labels: Vec<Option<String>>,
    /// Variable name to label.
    pub labels: BTreeMap<String, String>,
    /// Variable name to value-label mapping.
    pub value_labels: BTreeMap<String, ValueLabels>,
    /// Variable name to measurement level.
    pub measures: BTreeMap<String, MeasureLevel>,
    /// Variable name to display width.
    pub display_widths: BTreeMap<String, u32>,
    /// Variable name to type/format tag (e.g. `F8.2`, `A20`).
    pub variable_types: BTreeMap<String, String>,
    /// Variable name to user-defined missing ranges.
    pub missing_ranges: BTreeMap<String, Vec<MissingRange>>,
}

impl FileMetadata {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            column_names: Vec::new(),
            column_labels: Vec::new(),
            labels: BTreeMap::new(),
            value_labels: BTreeMap::new(),
            measures: BTreeMap::new(),
            display_widths: BTreeMap::new(),
            variable_types: BTreeMap::new(),
            missing_ranges: BTreeMap::new(),
        }
    }

    /// Appends an unlabeled column.
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>) -> Self {
        self.column_names.push(name.into());
        self.column_labels.push(None);
        self
    }

    /// Appends a column and records its label.
    #[must_use]
    pub fn with_labeled_column(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        let label = label.into();
        self.column_names.push(name.clone());
        self.column_labels.push(Some(label.clone()));
        self.labels.insert(name, label);
        self
    }

    #[must_use]
    pub fn with_value_labels(mut self, name: impl Into<String>, labels: ValueLabels) -> Self {
        self.value_labels.insert(name.into(), labels);
        self
    }

    #[must_use]
    pub fn with_measure(mut self, name: impl Into<String>, measure: MeasureLevel) -> Self {
        self.measures.insert(name.into(), measure);
        self
    }

    #[must_use]
    pub fn with_display_width(mut self, name: impl Into<String>, width: u32) -> Self {
        self.display_widths.insert(name.into(), width);
        self
    }

    #[must_use]
    pub fn with_variable_type(mut self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.variable_types.insert(name.into(), tag.into());
        self
    }

    #[must_use]
    pub fn with_missing_ranges(mut self, name: impl Into<String>, ranges: Vec<MissingRange>) -> Self {
        self.missing_ranges.insert(name.into(), ranges);
        self
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|column| column == name)
    }

    /// Label recorded for `name`, if any.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}
