//! Run driver: index, group, detect, assemble.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, info_span};
use wave_model::{Catalog, FileId, FileMetadata, MetadataKind, WaveSet};

use crate::assemble::assemble;
use crate::detect::InconsistencyFlags;
use crate::error::Result;
use crate::group::GroupedMetadata;
use crate::index::VariableIndex;

/// Reconciles the metadata of a reference-first wave set into one catalog.
///
/// Annotations keyed by variables that no file carries are ignored.
pub fn reconcile(waves: &WaveSet, annotations: &BTreeMap<String, String>) -> Catalog {
    let span = info_span!("reconcile", reference = %waves.reference(), file_count = waves.len());
    let _guard = span.enter();
    let start = Instant::now();

    let index = VariableIndex::from_files(waves.files());
    let grouped = GroupedMetadata::build(waves.files(), &index);
    let flags = InconsistencyFlags::detect_all(&grouped);

    let unmatched = annotations
        .keys()
        .filter(|variable| !index.contains(variable))
        .count();
    if unmatched > 0 {
        debug!(unmatched, "annotations without a matching variable ignored");
    }

    let rows = assemble(&index, &grouped, &flags, annotations);
    info!(
        variable_count = rows.len(),
        inconsistent_labels = flags.inconsistent_count(MetadataKind::Label),
        inconsistent_value_labels = flags.inconsistent_count(MetadataKind::ValueLabels),
        duration_ms = start.elapsed().as_millis(),
        "catalog assembled"
    );

    Catalog {
        reference: waves.reference().clone(),
        files: waves.file_ids(),
        rows,
    }
}

/// Orders `files` reference-first and reconciles them.
///
/// # Errors
///
/// Fails before any grouping when `reference` is not among `files`.
pub fn reconcile_files(
    reference: &FileId,
    files: Vec<FileMetadata>,
    annotations: &BTreeMap<String, String>,
) -> Result<Catalog> {
    let waves = WaveSet::new(reference, files)?;
    Ok(reconcile(&waves, annotations))
}
