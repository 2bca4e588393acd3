//! Reference-first ordering of waves.
//!
//! Every run processes files in one deterministic order: the reference file
//! first, the remaining files in the order they were listed. First-appearance
//! ordering of variables and reference-file precedence for scalar metadata
//! both depend on it.

use std::collections::BTreeSet;

use crate::{FileId, FileMetadata, ModelError};

/// Moves the item identified as `reference` to position 0, keeping the
/// relative order of the rest.
///
/// Fails if the reference is absent or if two items share an identifier.
pub fn reference_first<T, F>(items: Vec<T>, reference: &FileId, id_of: F) -> Result<Vec<T>, ModelError>
where
    F: Fn(&T) -> &FileId,
{
    let mut seen = BTreeSet::new();
    for item in &items {
        let id = id_of(item);
        if !seen.insert(id.clone()) {
            return Err(ModelError::DuplicateFile(id.to_string()));
        }
    }
    let Some(position) = items.iter().position(|item| id_of(item) == reference) else {
        return Err(ModelError::MissingReferenceFile {
            reference: reference.to_string(),
            available: items.len(),
        });
    };
    let mut items = items;
    let reference_item = items.remove(position);
    items.insert(0, reference_item);
    Ok(items)
}

/// The fully materialized, reference-first collection of per-file records
/// that a reconciliation run consumes.
#[derive(Debug, Clone)]
pub struct WaveSet {
    files: Vec<FileMetadata>,
}

#[allow(clippy::len_without_is_empty)]
impl WaveSet {
    /// Orders `files` with `reference` first.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingReferenceFile`] when no record carries the
    /// reference identifier; [`ModelError::DuplicateFile`] when two records
    /// share an identifier.
    pub fn new(reference: &FileId, files: Vec<FileMetadata>) -> Result<Self, ModelError> {
        let files = reference_first(files, reference, |file| &file.file)?;
        Ok(Self { files })
    }

    pub fn reference(&self) -> &FileId {
        // The constructor guarantees at least the reference record.
        &self.files[0].file
    }

    pub fn files(&self) -> &[FileMetadata] {
        &self.files
    }

    pub fn file_ids(&self) -> Vec<FileId> {
        self.files.iter().map(|file| file.file.clone()).collect()
    }

    /// Number of files, never zero.
    pub fn len(&self) -> usize {
        self.files.len()
    }
}
