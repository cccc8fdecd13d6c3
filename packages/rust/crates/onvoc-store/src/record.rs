//! Term record type shared by every level of the vocabulary tree.

use serde::{Deserialize, Serialize};

/// One row of a vocabulary TSV file.
///
/// Categories, subcategories, and leaf terms all use the same three-column
/// shape; they differ only in which file the row lives in.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TermRecord {
    /// Human-readable display term (spaces, mixed case).
    pub term: String,
    /// Stable identifier of the form `PREFIX:NNNNNNN`.
    pub vocabulary_id: String,
    /// Free-text comment, empty at creation time and edited out-of-band.
    #[serde(default)]
    pub comment: String,
}

impl TermRecord {
    /// Create a record with an empty comment.
    #[must_use]
    pub fn new(term: String, vocabulary_id: String) -> Self {
        Self {
            term,
            vocabulary_id,
            comment: String::new(),
        }
    }
}
