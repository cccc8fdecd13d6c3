//! Error types for the validators.

use std::path::PathBuf;

use thiserror::Error;

use onvoc_store::StoreError;
use onvoc_tree::TreeError;

/// Error types for validator runs.
///
/// Findings are not errors: a validator that runs to completion returns a
/// report, and the caller decides the exit status from it. These variants
/// cover the cases where the validator cannot run at all.
#[derive(Error, Debug)]
pub enum CheckError {
    /// A required root directory does not exist.
    #[error("directory not found: {0}")]
    MissingRoot(PathBuf),

    /// Failure in the underlying term store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Failure while enumerating a source tree.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
