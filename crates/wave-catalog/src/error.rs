use thiserror::Error;
use wave_model::ModelError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The run cannot establish a reference-first file order.
    #[error("configuration error: {0}")]
    Configuration(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
