//! Error types for tree materialization and synchronization.

use std::path::PathBuf;

use thiserror::Error;

use onvoc_store::StoreError;

/// Error types for the tree layer.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A required root directory does not exist.
    #[error("directory not found: {0}")]
    MissingRoot(PathBuf),

    /// Failure in the underlying term store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
