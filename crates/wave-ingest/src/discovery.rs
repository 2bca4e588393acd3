//! Wave discovery and processing order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use wave_model::{FileId, reference_first};

use crate::error::{IngestError, Result};

/// Extension of per-file metadata documents.
pub const METADATA_EXTENSION: &str = "json";

/// A metadata document found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredWave {
    /// Wave identifier (the document's file stem).
    pub id: FileId,
    /// Path to the metadata document.
    pub path: PathBuf,
}

/// Lists all metadata documents in a directory.
///
/// Returns files sorted by filename.
pub fn list_metadata_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_metadata = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(METADATA_EXTENSION))
            .unwrap_or(false);

        if is_metadata {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Derives the wave identifier of a metadata document from its file stem.
pub fn wave_id(path: &Path) -> Result<FileId> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| IngestError::InvalidFileName {
            path: path.to_path_buf(),
        })?;
    FileId::new(stem).map_err(|_| IngestError::InvalidFileName {
        path: path.to_path_buf(),
    })
}

/// Discovers every wave in `dir`, in listing order.
pub fn discover_waves(dir: &Path) -> Result<Vec<DiscoveredWave>> {
    let files = list_metadata_files(dir)?;
    let mut waves = Vec::with_capacity(files.len());
    for path in files {
        let id = wave_id(&path)?;
        waves.push(DiscoveredWave { id, path });
    }
    debug!(dir = %dir.display(), wave_count = waves.len(), "waves discovered");
    Ok(waves)
}

/// Drops the wave whose document is `path`.
///
/// Used to keep a previously written catalog out of the inputs when the
/// output path lies inside the input directory.
pub fn exclude_path(waves: Vec<DiscoveredWave>, path: &Path) -> Vec<DiscoveredWave> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    waves
        .into_iter()
        .filter(|wave| {
            let candidate =
                std::fs::canonicalize(&wave.path).unwrap_or_else(|_| wave.path.clone());
            if candidate == target {
                debug!(path = %wave.path.display(), "skipping catalog output");
                false
            } else {
                true
            }
        })
        .collect()
}

/// Restricts `waves` to the `retain` subset and orders the result
/// reference-first.
///
/// An empty `retain` keeps every wave. The reference wave is always kept.
/// Retain entries that match no discovered wave are ignored with a warning.
///
/// # Errors
///
/// [`IngestError::Configuration`] when the reference wave was not discovered.
pub fn select_waves(
    waves: Vec<DiscoveredWave>,
    reference: &FileId,
    retain: &[FileId],
) -> Result<Vec<DiscoveredWave>> {
    let known: BTreeSet<&FileId> = waves.iter().map(|wave| &wave.id).collect();
    for id in retain {
        if !known.contains(id) {
            warn!(wave = %id, "retained wave not found; ignoring");
        }
    }
    let selected: Vec<DiscoveredWave> = if retain.is_empty() {
        waves
    } else {
        waves
            .into_iter()
            .filter(|wave| &wave.id == reference || retain.contains(&wave.id))
            .collect()
    };
    let ordered = reference_first(selected, reference, |wave| &wave.id)?;
    debug!(
        reference = %reference,
        wave_count = ordered.len(),
        "waves selected"
    );
    Ok(ordered)
}
