//! Metadata reconciliation across survey waves.
//!
//! Given the per-file metadata of several waves, this crate builds the
//! cross-file variable index, groups each metadata kind by variable, flags
//! variables whose metadata disagrees between files, and assembles one
//! catalog row per variable.
//!
//! # Example
//!
//! ```ignore
//! use std::collections::BTreeMap;
//! use wave_catalog::reconcile_files;
//! use wave_model::{FileId, FileMetadata};
//!
//! let f1 = FileId::new("F1")?;
//! let files = vec![
//!     FileMetadata::new(f1.clone()).with_labeled_column("age", "Age in years"),
//!     FileMetadata::new(FileId::new("F2")?).with_labeled_column("age", "Age in years"),
//! ];
//! let catalog = reconcile_files(&f1, files, &BTreeMap::new())?;
//! assert_eq!(catalog.rows[0].labels, vec!["Age in years"]);
//! ```

pub mod assemble;
pub mod detect;
pub mod error;
pub mod group;
pub mod index;
pub mod reconcile;

pub use assemble::{assemble, distinct, distinct_by, representative};
pub use detect::{Flags, InconsistencyFlags, detect, value_labels_equal};
pub use error::{CatalogError, Result};
pub use group::{Grouped, GroupedMetadata, group};
pub use index::{VariableIndex, build_index};
pub use reconcile::{reconcile, reconcile_files};
