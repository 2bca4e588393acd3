//! CLI argument definitions for the wave catalog.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use wave_cli::config::Overrides;
use wave_output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "wave-catalog",
    version,
    about = "Reconcile variable metadata across survey waves",
    long_about = "Build one catalog of every variable found across the waves of a survey.\n\n\
                  Each row lists the labels, value labels, measurement level and display\n\
                  width recorded for the variable, flags disagreements between waves, and\n\
                  records which waves carry it. The reference wave wins wherever a single\n\
                  value is shown."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./wave-catalog.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile all waves and publish the variable catalog.
    Build(BuildArgs),

    /// List waves in processing order.
    Waves(WaveArgs),
}

#[derive(Args)]
pub struct WaveArgs {
    /// Directory holding one metadata document per wave.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Wave whose values take precedence (file stem of its metadata document).
    #[arg(long = "reference", value_name = "WAVE")]
    pub reference: Option<String>,

    /// Only process these waves (the reference wave is always kept).
    #[arg(long = "retain", value_name = "WAVE", value_delimiter = ',')]
    pub retain: Vec<String>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub waves: WaveArgs,

    /// Annotation sheet (CSV with variable and comment columns).
    #[arg(long = "annotations", value_name = "CSV")]
    pub annotations: Option<PathBuf>,

    /// Catalog output path (default: <INPUT_DIR>/generated/variable_catalog.<ext>).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Catalog format.
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Add variable type, missing range, measure and width columns.
    #[arg(long = "extended", overrides_with = "no_extended")]
    pub extended: bool,

    /// Standard columns only, even when the configuration enables extended.
    #[arg(long = "no-extended", overrides_with = "extended")]
    pub no_extended: bool,

    /// Reconcile and report without writing the catalog.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl WaveArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            input_dir: self.input_dir.clone(),
            reference: self.reference.clone(),
            retain: self.retain.clone(),
            ..Overrides::default()
        }
    }
}

impl BuildArgs {
    fn extended_override(&self) -> Option<bool> {
        match (self.extended, self.no_extended) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            annotations: self.annotations.clone(),
            output: self.output.clone(),
            format: self.format.map(OutputFormat::from),
            extended: self.extended_override(),
            ..self.waves.overrides()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
