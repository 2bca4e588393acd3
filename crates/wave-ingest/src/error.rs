//! Error types for wave ingestion.

use std::path::PathBuf;
use thiserror::Error;
use wave_model::ModelError;

/// Errors that can occur while discovering and reading wave inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file name cannot serve as a wave identifier.
    #[error("cannot derive a wave identifier from {path}")]
    InvalidFileName { path: PathBuf },

    // === Metadata Errors ===
    /// The per-file metadata document is not valid.
    #[error("failed to parse metadata document {path}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `column_labels` is not aligned with `column_names`.
    #[error("{path}: {labels} column label(s) for {columns} column(s)")]
    MisalignedLabels {
        path: PathBuf,
        columns: usize,
        labels: usize,
    },

    // === Annotation Errors ===
    /// Failed to parse the annotation sheet.
    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    /// Required column not found in the annotation sheet.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Configuration Errors ===
    /// The wave selection cannot be ordered reference-first.
    #[error("configuration error: {0}")]
    Configuration(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::DirectoryNotFound {
            path: PathBuf::from("/path/to/waves"),
        };
        assert_eq!(err.to_string(), "directory not found: /path/to/waves");
    }

    #[test]
    fn test_parse_error_leaves_cause_to_source() {
        let source = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        let cause = source.to_string();
        let err = IngestError::MetadataParse {
            path: PathBuf::from("waves/parent.json"),
            source,
        };
        assert_eq!(
            err.to_string(),
            "failed to parse metadata document waves/parent.json"
        );
        let chained = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(chained, Some(cause));
    }

    #[test]
    fn test_error_from_model() {
        let model_err = ModelError::MissingReferenceFile {
            reference: "parent".to_string(),
            available: 0,
        };
        let ingest_err: IngestError = model_err.into();
        assert!(matches!(ingest_err, IngestError::Configuration(_)));
    }
}
