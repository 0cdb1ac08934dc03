// Error type for the fallible edges of the catalog: loading the dataset,
// resolving names coming from user configuration, and CSV export.
// Filtering, sorting and deltas never fail; missing data is policy there.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vehicle dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("no vehicle with id {0}")]
    UnknownBaseline(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io { path: path.into(), source }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
