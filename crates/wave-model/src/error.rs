use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The designated reference file is not among the supplied files.
    #[error("reference file '{reference}' not found among {available} supplied file(s)")]
    MissingReferenceFile { reference: String, available: usize },

    #[error("duplicate file identifier '{0}'")]
    DuplicateFile(String),

    #[error("invalid file identifier: {0:?}")]
    InvalidFileId(String),

    #[error("unknown measurement level: {0:?}")]
    UnknownMeasureLevel(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
