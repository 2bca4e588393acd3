use std::path::PathBuf;

use wave_model::{Catalog, FileId};
use wave_output::{PublishOutcome, RenderOptions};

#[derive(Debug)]
pub struct BuildResult {
    pub input_dir: PathBuf,
    pub catalog: Catalog,
    pub render: RenderOptions,
    pub annotation_count: usize,
    /// `None` on a dry run.
    pub publication: Option<Publication>,
}

#[derive(Debug)]
pub struct Publication {
    pub location: String,
    pub outcome: PublishOutcome,
}

#[derive(Debug)]
pub struct WaveSummary {
    pub id: FileId,
    pub path: PathBuf,
    pub column_count: usize,
    pub labeled_count: usize,
    pub is_reference: bool,
}
