//! Variable metadata model for cross-wave reconciliation.
//!
//! These types describe what each input file says about its variables
//! ([`FileMetadata`]), the reference-first file ordering a run relies on
//! ([`WaveSet`]), and the unified result ([`Catalog`]).

pub mod catalog;
pub mod enums;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod value;
pub mod wave;

pub use catalog::{Catalog, CatalogRow};
pub use enums::{MeasureLevel, MetadataKind};
pub use error::{ModelError, Result};
pub use ids::FileId;
pub use metadata::FileMetadata;
pub use value::{MissingRange, ValueCode, ValueLabels};
pub use wave::{WaveSet, reference_first};
