//! The unified variable catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{FileId, MeasureLevel, MetadataKind, MissingRange, ValueLabels};

/// One row per unique variable across all processed files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub variable_name: String,
    /// Distinct labels in first-seen order (reference file first).
    pub labels: Vec<String>,
    /// Distinct value-label mappings, deduplicated by canonical form.
    pub value_labels: Vec<ValueLabels>,
    /// First recorded measurement level (reference-file precedence).
    pub measure: Option<MeasureLevel>,
    /// First recorded display width (reference-file precedence).
    pub display_width: Option<u32>,
    /// Distinct type tags in first-seen order.
    pub variable_types: Vec<String>,
    /// Distinct missing-range lists in first-seen order.
    pub missing_ranges: Vec<Vec<MissingRange>>,
    /// Inconsistency flag per kind. A kind with no recorded values has no entry.
    pub flags: BTreeMap<MetadataKind, bool>,
    /// Free-text annotation from the external comment sheet.
    pub annotation: Option<String>,
    /// Number of files whose column list contains the variable.
    pub appearance_count: usize,
    /// Files containing the variable, in processing order.
    pub appearances: Vec<FileId>,
}

impl CatalogRow {
    /// `None` when no file recorded a value of this kind for the variable.
    pub fn flag(&self, kind: MetadataKind) -> Option<bool> {
        self.flags.get(&kind).copied()
    }

    pub fn is_inconsistent(&self, kind: MetadataKind) -> bool {
        self.flag(kind).unwrap_or(false)
    }

    /// Catalog cell text for a flag: the fixed message or blank.
    pub fn flag_text(&self, kind: MetadataKind) -> &'static str {
        if self.is_inconsistent(kind) {
            kind.inconsistency_message()
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// The reference file of the run.
    pub reference: FileId,
    /// All processed files in processing order.
    pub files: Vec<FileId>,
    pub rows: Vec<CatalogRow>,
}

impl Catalog {
    pub fn variable_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, variable: &str) -> Option<&CatalogRow> {
        self.rows.iter().find(|row| row.variable_name == variable)
    }

    pub fn inconsistent_count(&self, kind: MetadataKind) -> usize {
        self.rows
            .iter()
            .filter(|row| row.is_inconsistent(kind))
            .count()
    }

    /// Variables present in every processed file.
    pub fn shared_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.appearance_count == self.files.len())
            .count()
    }

    pub fn annotated_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.annotation.is_some())
            .count()
    }
}
