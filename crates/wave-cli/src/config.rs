//! Run configuration.
//!
//! Settings come from an optional TOML file and command-line flags; flags win.
//! Relative paths in the file are resolved against the file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use wave_model::FileId;
use wave_output::{OutputFormat, RenderOptions};

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "wave-catalog.toml";

/// File stem of the catalog when no output path is configured.
pub const DEFAULT_OUTPUT_STEM: &str = "variable_catalog";

/// Subdirectory of the input directory that holds the default catalog.
///
/// Discovery does not descend into subdirectories, so a catalog written here
/// is never read back as a wave.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub reference: Option<String>,
    pub retain: Vec<String>,
    pub annotations: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub extended: Option<bool>,
}

impl FileConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse configuration")
    }

    /// Reads a configuration file, resolving its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("invalid configuration {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Loads `explicit` when given, otherwise [`DEFAULT_CONFIG_FILE`] if it
    /// exists, otherwise an empty configuration.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let join = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        self.input_dir = self.input_dir.map(join);
        self.annotations = self.annotations.map(join);
        self.output = self.output.map(join);
        self
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub reference: Option<String>,
    pub retain: Vec<String>,
    pub annotations: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub extended: Option<bool>,
}

/// Effective settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_dir: PathBuf,
    reference: Option<FileId>,
    pub retain: Vec<FileId>,
    pub annotations: Option<PathBuf>,
    pub output: PathBuf,
    pub render: RenderOptions,
}

impl Settings {
    /// Merges file values with command-line overrides.
    ///
    /// A non-empty `retain` on the command line replaces the file's list.
    /// Without an output path the catalog goes to
    /// `<input_dir>/generated/variable_catalog.<ext>`.
    pub fn merge(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let input_dir = overrides
            .input_dir
            .or(file.input_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let reference = overrides
            .reference
            .or(file.reference)
            .map(|value| FileId::new(value).context("invalid reference wave"))
            .transpose()?;
        let retain_values = if overrides.retain.is_empty() {
            file.retain
        } else {
            overrides.retain
        };
        let retain = retain_values
            .into_iter()
            .map(|value| FileId::new(value).context("invalid retained wave"))
            .collect::<Result<Vec<_>>>()?;
        let format = overrides.format.or(file.format).unwrap_or_default();
        let extended = overrides.extended.or(file.extended).unwrap_or(false);
        let output = overrides.output.or(file.output).unwrap_or_else(|| {
            input_dir
                .join(DEFAULT_OUTPUT_DIR)
                .join(format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()))
        });
        Ok(Self {
            input_dir,
            reference,
            retain,
            annotations: overrides.annotations.or(file.annotations),
            output,
            render: RenderOptions::new(format, extended),
        })
    }

    /// The reference wave, if one was configured.
    pub fn reference_opt(&self) -> Option<&FileId> {
        self.reference.as_ref()
    }

    /// The reference wave.
    ///
    /// # Errors
    ///
    /// Fails when neither the command line nor the configuration file names one.
    pub fn reference(&self) -> Result<&FileId> {
        self.reference.as_ref().ok_or_else(|| {
            anyhow!(
                "no reference wave configured; pass --reference or set `reference` in {DEFAULT_CONFIG_FILE}"
            )
        })
    }
}
