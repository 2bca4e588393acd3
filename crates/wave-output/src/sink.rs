//! Catalog publication.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use wave_model::Catalog;

use crate::delimited::render_csv;
use crate::json::render_json;
use crate::types::{OutputFormat, PublishOutcome, RenderOptions};

/// Destination that can create or replace the catalog artifact.
pub trait CatalogSink {
    /// Human-readable location of the artifact.
    fn location(&self) -> String;

    /// Writes `contents` as the new catalog, replacing any previous version.
    fn publish(&self, contents: &str) -> Result<PublishOutcome>;
}

/// Publishes the catalog to a file on the local filesystem.
///
/// The rendering is written to a hidden sibling file first and then renamed
/// over the target, so readers never observe a partial catalog.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catalog".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl CatalogSink for FileSink {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn publish(&self, contents: &str) -> Result<PublishOutcome> {
        ensure_parent_dir(&self.path)?;
        let outcome = if self.path.exists() {
            PublishOutcome::Replaced
        } else {
            PublishOutcome::Created
        };
        let staging = self.staging_path();
        let mut file =
            File::create(&staging).with_context(|| format!("create {}", staging.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("write {}", staging.display()))?;
        file.sync_all()
            .with_context(|| format!("sync {}", staging.display()))?;
        drop(file);
        if let Err(error) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(error).with_context(|| format!("replace {}", self.path.display()));
        }
        info!(
            path = %self.path.display(),
            outcome = outcome.as_str(),
            bytes = contents.len(),
            "catalog published"
        );
        Ok(outcome)
    }
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Renders the catalog in the requested format.
pub fn render_catalog(catalog: &Catalog, options: RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Csv => render_csv(catalog, options.extended),
        OutputFormat::Json => render_json(catalog, options.extended),
    }
}

/// Renders the catalog and hands it to `sink`.
pub fn publish_catalog<S: CatalogSink + ?Sized>(
    catalog: &Catalog,
    options: RenderOptions,
    sink: &S,
) -> Result<PublishOutcome> {
    let contents = render_catalog(catalog, options)?;
    sink.publish(&contents)
        .with_context(|| format!("publish catalog to {}", sink.location()))
}
