//! Output-related types for catalog publication.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialization of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text with one header row.
    #[default]
    Csv,
    /// Array of row objects; flags keep absent distinct from consistent.
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// How a catalog is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Append the variable type, missing range, measure and width columns.
    pub extended: bool,
}

impl RenderOptions {
    pub fn new(format: OutputFormat, extended: bool) -> Self {
        Self { format, extended }
    }
}

/// Whether publishing created a new artifact or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Replaced,
}

impl PublishOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishOutcome::Created => "created",
            PublishOutcome::Replaced => "replaced",
        }
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
