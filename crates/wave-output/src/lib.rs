//! Catalog renderings and sinks.
//!
//! The catalog is rendered as CSV (the default, one header row) or JSON and
//! handed to a [`CatalogSink`], which creates or replaces the artifact.

mod delimited;
mod json;
mod sink;
mod types;

pub use delimited::{EXTENDED_COLUMNS, STANDARD_COLUMNS, csv_header, render_csv, write_csv};
pub use json::render_json;
pub use sink::{CatalogSink, FileSink, ensure_parent_dir, publish_catalog, render_catalog};
pub use types::{OutputFormat, PublishOutcome, RenderOptions};
