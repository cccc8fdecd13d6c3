//! Incremental reconciliation of the copy tree against the source tree.
//!
//! The synchronizer brings a previously materialized `.tsv` copy up to date
//! with additions in the plain-text source: new categories, new subcategory
//! files, and new terms each get a fresh identifier seeded past the maximum
//! already present anywhere in the copy. Existing rows are never rewritten,
//! reordered, or removed, and deletions in the source are never propagated.
//! Running twice with an unchanged source produces no writes on the second
//! run.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use onvoc_store::{IdAllocator, IdFormat, TermRecord, naming, scan_max_id, tsv};

use crate::error::TreeError;
use crate::layout::{CATEGORIES_FILE, SUBCATEGORIES_FILE, leaf_file};
use crate::source;

/// What one synchronization run added to the copy.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    /// Numeric seed the allocator started past.
    pub seed: u64,
    /// Display terms of categories added to `Categories.tsv`.
    pub added_categories: Vec<String>,
    /// `Category/Subcategory` display pairs added to a `Subcategories.tsv`.
    pub added_subcategories: Vec<String>,
    /// Terms appended to leaf files, in allocation order.
    pub added_terms: Vec<String>,
}

impl SyncReport {
    /// Whether the run wrote anything.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.added_categories.is_empty()
            || !self.added_subcategories.is_empty()
            || !self.added_terms.is_empty()
    }

    /// Total count of added rows.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.added_categories.len() + self.added_subcategories.len() + self.added_terms.len()
    }
}

/// Incremental tree synchronizer.
///
/// Unlike the initializer, allocations here are not memoized by string:
/// a term newly appearing in two different leaves during one run receives
/// two identifiers. Cross-file identity is only preserved to the extent
/// the pre-existing copy already captured it; the bijection validator is
/// the gate that surfaces any break.
#[derive(Debug)]
pub struct TreeSynchronizer {
    original: PathBuf,
    copy: PathBuf,
    format: IdFormat,
    strict: bool,
}

impl TreeSynchronizer {
    /// Create a synchronizer between a source root and a copy root.
    #[must_use]
    pub fn new(original: PathBuf, copy: PathBuf, format: IdFormat, strict: bool) -> Self {
        Self {
            original,
            copy,
            format,
            strict,
        }
    }

    /// Reconcile the copy with the source, appending whatever is missing.
    pub fn run(&self) -> Result<SyncReport, TreeError> {
        if !self.original.is_dir() {
            return Err(TreeError::MissingRoot(self.original.clone()));
        }
        if !self.copy.is_dir() {
            return Err(TreeError::MissingRoot(self.copy.clone()));
        }

        let seed = scan_max_id(&self.copy, &self.format, self.strict)?;
        let mut allocator = IdAllocator::new(self.format.clone(), seed);
        log::debug!("allocator seeded past {seed}");

        let categories_path = self.copy.join(CATEGORIES_FILE);
        let mut category_to_id = if categories_path.is_file() {
            tsv::load_term_map(&categories_path, self.strict)?
        } else {
            tsv::append_records(&categories_path, &[])?;
            HashMap::new()
        };

        // Per-category subcategory maps, keyed by category display term.
        let mut subcategory_to_id: HashMap<String, HashMap<String, String>> = HashMap::new();
        for term in category_to_id.keys() {
            let folder = naming::display_to_slug(term);
            let map = tsv::load_term_map(
                &self.copy.join(&folder).join(SUBCATEGORIES_FILE),
                self.strict,
            )?;
            subcategory_to_id.insert(term.clone(), map);
        }

        let mut report = SyncReport {
            seed,
            ..SyncReport::default()
        };

        for category_folder in source::category_dirs(&self.original)? {
            let original_dir = self.original.join(&category_folder);
            let copy_dir = self.copy.join(&category_folder);
            let category_term = naming::slug_to_display(&category_folder);
            let subcategories_path = copy_dir.join(SUBCATEGORIES_FILE);

            if category_to_id.contains_key(&category_term) {
                // Tolerate partial prior state: folder or listing may be gone.
                fs::create_dir_all(&copy_dir)?;
                if !subcategories_path.is_file() {
                    tsv::append_records(&subcategories_path, &[])?;
                    subcategory_to_id.insert(category_term.clone(), HashMap::new());
                } else if !subcategory_to_id.contains_key(&category_term) {
                    subcategory_to_id.insert(
                        category_term.clone(),
                        tsv::load_term_map(&subcategories_path, self.strict)?,
                    );
                }
            } else {
                let id = allocator.allocate();
                tsv::append_records(
                    &categories_path,
                    &[TermRecord::new(category_term.clone(), id.clone())],
                )?;
                log::info!("added category '{category_term}' with id {id}");
                category_to_id.insert(category_term.clone(), id);
                report.added_categories.push(category_term.clone());

                fs::create_dir_all(&copy_dir)?;
                tsv::append_records(&subcategories_path, &[])?;
                subcategory_to_id.insert(category_term.clone(), HashMap::new());
            }

            for file in source::subcategory_files(&original_dir)? {
                let stem = source::file_stem(&file);
                let subcategory_term = naming::slug_to_display(&stem);
                let leaf_path = copy_dir.join(leaf_file(&stem));

                let known = subcategory_to_id
                    .get(&category_term)
                    .is_some_and(|m| m.contains_key(&subcategory_term));
                if known {
                    if !leaf_path.is_file() {
                        tsv::append_records(&leaf_path, &[])?;
                    }
                } else {
                    let id = allocator.allocate();
                    tsv::append_records(
                        &subcategories_path,
                        &[TermRecord::new(subcategory_term.clone(), id.clone())],
                    )?;
                    log::info!(
                        "added subcategory '{subcategory_term}' with id {id} under '{category_term}'"
                    );
                    subcategory_to_id
                        .entry(category_term.clone())
                        .or_default()
                        .insert(subcategory_term.clone(), id);
                    report
                        .added_subcategories
                        .push(format!("{category_term}/{subcategory_term}"));
                    tsv::append_records(&leaf_path, &[])?;
                }

                let term_to_id = tsv::load_term_map(&leaf_path, self.strict)?;
                let source_terms = source::read_term_lines(&original_dir.join(&file))?;

                let mut new_rows = Vec::new();
                for term in &source_terms {
                    if term_to_id.contains_key(term) {
                        continue;
                    }
                    let id = allocator.allocate();
                    log::info!("adding term '{term}' with id {id} to {}", leaf_path.display());
                    new_rows.push(TermRecord::new(term.clone(), id));
                    report.added_terms.push(term.clone());
                }
                if !new_rows.is_empty() {
                    tsv::append_records(&leaf_path, &new_rows)?;
                }
            }
        }

        log::info!(
            "synchronization complete: {} additions",
            report.change_count()
        );
        Ok(report)
    }
}
