//! Cross-tree drift audit between the plain-text source and the copy.
//!
//! Read-only counterpart of the synchronizer: reports what a sync run
//! should have reconciled, per category folder, subcategory file, and
//! term, in both directions. A term present only in the source is tagged
//! `[Missing Term]`; one present only in the copy is tagged `[Extra Term]`.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use onvoc_store::tsv;
use onvoc_tree::layout::SUBCATEGORIES_FILE;
use onvoc_tree::source;

use crate::error::CheckError;

/// Outcome of one drift audit.
#[derive(Debug, Default, Serialize)]
pub struct DriftReport {
    /// Human-readable mismatch lines, tagged by kind.
    pub mismatches: Vec<String>,
}

impl DriftReport {
    /// Whether both trees agree.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

fn dir_names(root: &Path) -> Result<BTreeSet<String>, CheckError> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.path().is_dir() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

fn stems_with_extension(
    dir: &Path,
    extension: &str,
    exclude: Option<&str>,
) -> Result<BTreeSet<String>, CheckError> {
    let mut stems = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if !path.is_file() || !tsv::has_extension(&path, extension) {
            continue;
        }
        if exclude.is_some_and(|e| name == e) {
            continue;
        }
        stems.insert(source::file_stem(&name));
    }
    Ok(stems)
}

fn tsv_term_set(path: &Path, strict: bool) -> Result<BTreeSet<String>, CheckError> {
    Ok(tsv::read_records(path, strict)?
        .into_iter()
        .map(|r| r.term)
        .collect())
}

/// Audit drift between a terms tree (`.txt`) and a vocabulary tree (`.tsv`).
pub fn check_synchronization(
    terms_root: &Path,
    vocab_root: &Path,
    strict: bool,
) -> Result<DriftReport, CheckError> {
    let mut report = DriftReport::default();

    // Nonexistent roots are findings, not errors: the audit degrades to
    // reporting that there is nothing to compare against.
    if !terms_root.is_dir() {
        report.mismatches.push(format!(
            "Terms root \"{}\" does not exist or is not a directory.",
            terms_root.display()
        ));
        return Ok(report);
    }
    if !vocab_root.is_dir() {
        report.mismatches.push(format!(
            "Vocabulary root \"{}\" does not exist or is not a directory.",
            vocab_root.display()
        ));
        return Ok(report);
    }

    let terms_categories = dir_names(terms_root)?;
    let vocab_categories = dir_names(vocab_root)?;

    for category in terms_categories.difference(&vocab_categories) {
        report.mismatches.push(format!(
            "[Missing Category Folder] \"{category}\" exists in terms but not in vocabulary."
        ));
    }
    for category in vocab_categories.difference(&terms_categories) {
        report.mismatches.push(format!(
            "[Extra Category Folder] \"{category}\" exists in vocabulary but not in terms."
        ));
    }

    for category in terms_categories.intersection(&vocab_categories) {
        let terms_dir = terms_root.join(category);
        let vocab_dir = vocab_root.join(category);

        let terms_subcats = stems_with_extension(&terms_dir, "txt", None)?;
        let vocab_subcats = stems_with_extension(&vocab_dir, "tsv", Some(SUBCATEGORIES_FILE))?;

        for sub in terms_subcats.difference(&vocab_subcats) {
            report.mismatches.push(format!(
                "[Missing Subcategory .tsv] \"{sub}.tsv\" under category \"{category}\" is missing in vocabulary."
            ));
        }
        for sub in vocab_subcats.difference(&terms_subcats) {
            report.mismatches.push(format!(
                "[Extra Subcategory .tsv] \"{sub}.tsv\" under category \"{category}\" is not in terms."
            ));
        }

        for sub in terms_subcats.intersection(&vocab_subcats) {
            let txt_path = terms_dir.join(format!("{sub}.txt"));
            let tsv_path = vocab_dir.join(format!("{sub}.tsv"));

            let source_terms: BTreeSet<String> = source::read_term_lines(&txt_path)?
                .into_iter()
                .collect();

            if !tsv_path.is_file() {
                report.mismatches.push(format!(
                    "[Missing .tsv File] Expected \"{sub}.tsv\" under \"{}\" corresponding to terms.",
                    vocab_dir.display()
                ));
                continue;
            }
            let copy_terms = tsv_term_set(&tsv_path, strict)?;

            for term in source_terms.difference(&copy_terms) {
                report.mismatches.push(format!(
                    "[Missing Term] \"{term}\" in terms/{category}/{sub}.txt is not found in vocabulary/{category}/{sub}.tsv."
                ));
            }
            for term in copy_terms.difference(&source_terms) {
                report.mismatches.push(format!(
                    "[Extra Term] \"{term}\" in vocabulary/{category}/{sub}.tsv is not defined in terms/{category}/{sub}.txt."
                ));
            }
        }
    }

    Ok(report)
}
