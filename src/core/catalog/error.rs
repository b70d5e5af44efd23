//! Error types for the catalog core.
//!
//! The state machines themselves never fail: out-of-range input is clamped
//! or ignored. Errors only arise at the boundaries, when validating a page
//! size supplied from outside or when reading catalog/state files.

use std::path::PathBuf;

use thiserror::Error;

use super::pagination::PageSize;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Page size outside the enumerated option set.
    #[error("Unsupported page size {requested}, expected one of {:?}", PageSize::OPTIONS)]
    InvalidPageSize { requested: usize },

    /// Item identifier that is neither a number nor a numeric string.
    #[error("Invalid item id: {0:?}")]
    InvalidItemId(String),

    /// Filesystem failure while reading or writing catalog/state files.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog or state file that is not valid JSON for the expected shape.
    #[error("Malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
