//! Per-file metadata extraction.
//!
//! Decoding statistical files is delegated to whatever produced the metadata
//! document; this module reads that document and normalises it into a
//! [`FileMetadata`] record. Other decoders can plug in through
//! [`MetadataExtractor`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};
use wave_model::{FileId, FileMetadata, MeasureLevel, MissingRange, ValueLabels};

use crate::discovery::DiscoveredWave;
use crate::error::{IngestError, Result};

/// Produces the metadata record of one wave.
pub trait MetadataExtractor {
    fn extract(&self, id: &FileId, path: &Path) -> Result<FileMetadata>;
}

/// Reads JSON metadata documents shaped like a statistical-file metadata dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMetadataExtractor;

impl MetadataExtractor for JsonMetadataExtractor {
    fn extract(&self, id: &FileId, path: &Path) -> Result<FileMetadata> {
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        parse_metadata_document(id.clone(), &text, path)
    }
}

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    column_names: Vec<String>,
    #[serde(default)]
    column_labels: Vec<Option<String>>,
    #[serde(default)]
    column_names_to_labels: Option<BTreeMap<String, Option<String>>>,
    #[serde(default)]
    variable_value_labels: BTreeMap<String, ValueLabels>,
    #[serde(default)]
    variable_measure: BTreeMap<String, MeasureLevel>,
    #[serde(default)]
    variable_display_width: BTreeMap<String, u32>,
    #[serde(default)]
    original_variable_types: BTreeMap<String, String>,
    #[serde(default)]
    missing_ranges: BTreeMap<String, Vec<MissingRange>>,
}

/// Parses one metadata document.
///
/// `path` is only used for error reporting.
pub fn parse_metadata_document(id: FileId, text: &str, path: &Path) -> Result<FileMetadata> {
    let document: MetadataDocument =
        serde_json::from_str(text).map_err(|source| IngestError::MetadataParse {
            path: path.to_path_buf(),
            source,
        })?;
    if !document.column_labels.is_empty()
        && document.column_labels.len() != document.column_names.len()
    {
        return Err(IngestError::MisalignedLabels {
            path: path.to_path_buf(),
            columns: document.column_names.len(),
            labels: document.column_labels.len(),
        });
    }
    Ok(normalize(id, document))
}

fn normalize(id: FileId, document: MetadataDocument) -> FileMetadata {
    let mut file = FileMetadata::new(id);
    let mut seen = BTreeSet::new();
    let mut duplicates = 0usize;
    for (position, name) in document.column_names.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            duplicates += 1;
            continue;
        }
        file.column_names.push(name.clone());
        file.column_labels
            .push(document.column_labels.get(position).cloned().flatten());
    }
    if duplicates > 0 {
        warn!(file = %file.file, duplicates, "duplicate column names dropped");
    }

    // Without an explicit name-to-label mapping, labels come from the aligned list.
    file.labels = match document.column_names_to_labels {
        Some(mapping) => mapping
            .into_iter()
            .filter_map(|(name, label)| label.map(|label| (name, label)))
            .collect(),
        None => file
            .column_names
            .iter()
            .zip(&file.column_labels)
            .filter_map(|(name, label)| label.clone().map(|label| (name.clone(), label)))
            .collect(),
    };
    file.value_labels = document.variable_value_labels;
    file.measures = document.variable_measure;
    file.display_widths = document.variable_display_width;
    file.variable_types = document.original_variable_types;
    file.missing_ranges = document.missing_ranges;

    let dropped = prune_undeclared(&mut file);
    if dropped > 0 {
        warn!(
            file = %file.file,
            dropped,
            "metadata entries for undeclared columns dropped"
        );
    }
    debug!(
        file = %file.file,
        column_count = file.column_count(),
        labeled = file.labels.len(),
        value_label_sets = file.value_labels.len(),
        "metadata extracted"
    );
    file
}

/// Removes metadata entries for variables the file does not carry.
fn prune_undeclared(file: &mut FileMetadata) -> usize {
    let declared: BTreeSet<String> = file.column_names.iter().cloned().collect();
    retain_declared(&mut file.labels, &declared)
        + retain_declared(&mut file.value_labels, &declared)
        + retain_declared(&mut file.measures, &declared)
        + retain_declared(&mut file.display_widths, &declared)
        + retain_declared(&mut file.variable_types, &declared)
        + retain_declared(&mut file.missing_ranges, &declared)
}

fn retain_declared<V>(mapping: &mut BTreeMap<String, V>, declared: &BTreeSet<String>) -> usize {
    let before = mapping.len();
    mapping.retain(|name, _| declared.contains(name));
    before - mapping.len()
}

/// Extracts every wave in order, failing on the first unreadable document.
pub fn extract_all<E: MetadataExtractor>(
    extractor: &E,
    waves: &[DiscoveredWave],
) -> Result<Vec<FileMetadata>> {
    waves
        .iter()
        .map(|wave| extractor.extract(&wave.id, &wave.path))
        .collect()
}
