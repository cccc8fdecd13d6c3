//! Error types for the term store.

use std::path::PathBuf;

use thiserror::Error;

/// Error types for TSV reading, writing, and identifier handling.
///
/// Each variant represents a specific failure mode in the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Identifier prefix could not be compiled into a pattern.
    #[error("invalid identifier prefix '{0}'")]
    InvalidPrefix(String),

    /// File has no header row (strict mode only).
    #[error("missing header row in {0}")]
    MissingHeader(PathBuf),

    /// Header lacks a required column (strict mode only).
    #[error("column '{column}' not found in header of {path}")]
    MissingColumn {
        /// File whose header was inspected.
        path: PathBuf,
        /// Column name that was looked up.
        column: String,
    },

    /// Data row has fewer fields than the resolved column layout needs
    /// (strict mode only; lenient parsing skips such rows).
    #[error("row {row} in {path} has {found} fields, expected at least {needed}")]
    ShortRow {
        /// File containing the row.
        path: PathBuf,
        /// 1-based row number, counting the header as row 1.
        row: usize,
        /// Fields present in the row.
        found: usize,
        /// Fields required by the column layout.
        needed: usize,
    },

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
