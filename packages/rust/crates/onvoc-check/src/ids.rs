//! Term ↔ identifier bijection check.
//!
//! Walks every `.tsv` under a root and verifies that each distinct term
//! maps to exactly one identifier and each identifier to exactly one term,
//! globally across all files. This is the direct test of the store's core
//! invariant; the write-time tools cannot break it within a single run,
//! but manual edits or cross-run misuse can.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use onvoc_store::tsv;

use crate::error::CheckError;

/// A term bound to more than one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct TermConflict {
    /// The display term.
    pub term: String,
    /// Every identifier the term appears with, sorted.
    pub ids: Vec<String>,
}

/// An identifier bound to more than one term.
#[derive(Debug, Clone, Serialize)]
pub struct IdConflict {
    /// The identifier.
    pub id: String,
    /// Every term the identifier appears with, sorted.
    pub terms: Vec<String>,
}

/// Outcome of one bijection check.
#[derive(Debug, Default, Serialize)]
pub struct IdReport {
    /// Terms carrying more than one identifier.
    pub term_conflicts: Vec<TermConflict>,
    /// Identifiers carrying more than one term.
    pub id_conflicts: Vec<IdConflict>,
    /// Distinct (term, id) pairs inspected.
    pub pairs: usize,
}

impl IdReport {
    /// Whether the bijection holds.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.term_conflicts.is_empty() && self.id_conflicts.is_empty()
    }

    /// Human-readable diagnostic lines, term conflicts first.
    #[must_use]
    pub fn findings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for conflict in &self.term_conflicts {
            lines.push(format!(
                "[Term] '{}' has multiple IDs: {:?}",
                conflict.term, conflict.ids
            ));
        }
        for conflict in &self.id_conflicts {
            lines.push(format!(
                "[ID] '{}' is assigned to multiple terms: {:?}",
                conflict.id, conflict.terms
            ));
        }
        lines
    }
}

/// Check the term ↔ identifier bijection across every `.tsv` under `root`.
pub fn check_ids(root: &Path, strict: bool) -> Result<IdReport, CheckError> {
    if !root.is_dir() {
        return Err(CheckError::MissingRoot(root.to_path_buf()));
    }

    let mut term_to_ids: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut id_to_terms: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut pairs = 0;

    for path in tsv::walk_tsv_files(root) {
        for record in tsv::read_records(&path, strict)? {
            if record.vocabulary_id.is_empty() {
                continue;
            }
            pairs += 1;
            term_to_ids
                .entry(record.term.clone())
                .or_default()
                .insert(record.vocabulary_id.clone());
            id_to_terms
                .entry(record.vocabulary_id)
                .or_default()
                .insert(record.term);
        }
    }

    let mut report = IdReport {
        pairs,
        ..IdReport::default()
    };
    for (term, ids) in term_to_ids {
        if ids.len() > 1 {
            report.term_conflicts.push(TermConflict {
                term,
                ids: ids.into_iter().collect(),
            });
        }
    }
    for (id, terms) in id_to_terms {
        if terms.len() > 1 {
            report.id_conflicts.push(IdConflict {
                id,
                terms: terms.into_iter().collect(),
            });
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_tree_passes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Cortex.tsv"),
            "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000001\t\nAmygdala\tTEST:0000002\t\n",
        )
        .unwrap();

        let report = check_ids(dir.path(), false).unwrap();
        assert!(report.is_clean());
        assert!(report.findings().is_empty());
    }

    #[test]
    fn test_one_id_two_terms_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Cortex.tsv"),
            "term\tvocabulary_id\tcomment\n\
             Cortex\tTEST:0000005\t\n\
             Cerebellum\tTEST:0000005\t\n",
        )
        .unwrap();

        let report = check_ids(dir.path(), false).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.id_conflicts.len(), 1);
        assert_eq!(report.id_conflicts[0].id, "TEST:0000005");
        assert_eq!(report.id_conflicts[0].terms, vec!["Cerebellum", "Cortex"]);
        assert!(report.findings()[0].contains("TEST:0000005"));
    }

    #[test]
    fn test_one_term_two_ids_across_files_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("A")).unwrap();
        fs::create_dir_all(dir.path().join("B")).unwrap();
        fs::write(
            dir.path().join("A/First.tsv"),
            "term\tvocabulary_id\tcomment\nCortex\tTEST:0000001\t\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("B/Second.tsv"),
            "term\tvocabulary_id\tcomment\nCortex\tTEST:0000002\t\n",
        )
        .unwrap();

        let report = check_ids(dir.path(), false).unwrap();
        assert_eq!(report.term_conflicts.len(), 1);
        assert_eq!(report.term_conflicts[0].term, "Cortex");
        assert_eq!(
            report.term_conflicts[0].ids,
            vec!["TEST:0000001", "TEST:0000002"]
        );
    }

    #[test]
    fn test_duplicate_rows_with_same_id_are_not_a_conflict() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Cortex.tsv"),
            "term\tvocabulary_id\tcomment\n\
             Hippocampus\tTEST:0000003\t\n\
             Hippocampus\tTEST:0000003\t\n",
        )
        .unwrap();

        let report = check_ids(dir.path(), false).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = check_ids(&dir.path().join("absent"), false);
        assert!(matches!(result, Err(CheckError::MissingRoot(_))));
    }
}
