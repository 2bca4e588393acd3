//! Wave input collaborators.
//!
//! This crate finds the per-file metadata documents of a survey series,
//! puts them in reference-first processing order, turns each into a
//! [`wave_model::FileMetadata`] record, and loads the optional annotation
//! sheet.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wave_ingest::{JsonMetadataExtractor, discover_waves, extract_all, select_waves};
//! use wave_model::FileId;
//!
//! let waves = discover_waves(Path::new("waves"))?;
//! let waves = select_waves(waves, &FileId::new("wave1")?, &[])?;
//! let files = extract_all(&JsonMetadataExtractor, &waves)?;
//! ```

mod annotations;
mod discovery;
mod error;
mod extract;

// === Error Types ===
pub use error::{IngestError, Result};

// === Wave Discovery ===
pub use discovery::{
    DiscoveredWave, METADATA_EXTENSION, discover_waves, exclude_path, list_metadata_files,
    select_waves, wave_id,
};

// === Metadata Extraction ===
pub use extract::{JsonMetadataExtractor, MetadataExtractor, extract_all, parse_metadata_document};

// === Annotations ===
pub use annotations::{load_annotations, read_annotations};
