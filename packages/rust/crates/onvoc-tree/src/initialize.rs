//! From-scratch materialization of the ID-annotated tree.
//!
//! Walks a plain-text source tree (category folders → `.txt` subcategory
//! files → term lines) and writes the parallel `.tsv` tree under a separate
//! output root. The source tree is never read for IDs and never mutated;
//! pre-existing output files are overwritten without merging. For
//! incremental updates against an existing copy use
//! [`crate::synchronize::TreeSynchronizer`] instead.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use onvoc_store::{IdAllocator, IdFormat, TermRecord, naming, tsv};

use crate::error::TreeError;
use crate::layout::{CATEGORIES_FILE, SUBCATEGORIES_FILE, leaf_file};
use crate::source;

/// Counts of what one initialization run wrote.
#[derive(Debug, Default, Serialize)]
pub struct InitReport {
    /// Category rows written to `Categories.tsv`.
    pub categories: usize,
    /// Subcategory rows written across all `Subcategories.tsv` files.
    pub subcategories: usize,
    /// Term rows written across all leaf files (duplicates included).
    pub terms: usize,
}

/// From-scratch tree materializer.
///
/// One allocator spans the whole run, memoized by exact string equality:
/// the same string anywhere in the source tree - category name,
/// subcategory name, or leaf term - receives the same identifier. The
/// store is one flat namespace of strings, not three per-level ones.
#[derive(Debug)]
pub struct TreeInitializer {
    input: PathBuf,
    output: PathBuf,
    format: IdFormat,
}

impl TreeInitializer {
    /// Create an initializer over a source root and an output root.
    #[must_use]
    pub fn new(input: PathBuf, output: PathBuf, format: IdFormat) -> Self {
        Self {
            input,
            output,
            format,
        }
    }

    /// Materialize the complete ID-annotated tree.
    pub fn run(&self) -> Result<InitReport, TreeError> {
        if !self.input.is_dir() {
            return Err(TreeError::MissingRoot(self.input.clone()));
        }

        let mut allocator = IdAllocator::new(self.format.clone(), 0);
        let mut report = InitReport::default();

        let categories = source::category_dirs(&self.input)?;

        let category_rows: Vec<TermRecord> = categories
            .iter()
            .map(|name| {
                let term = naming::slug_to_display(name);
                let id = allocator.get_or_create(&term);
                TermRecord::new(term, id)
            })
            .collect();
        report.categories = category_rows.len();

        fs::create_dir_all(&self.output)?;
        let categories_path = self.output.join(CATEGORIES_FILE);
        tsv::write_records(&categories_path, &category_rows)?;
        log::info!("wrote {}", categories_path.display());

        for name in &categories {
            self.write_category(name, &mut allocator, &mut report)?;
        }

        log::info!(
            "initialized {} categories, {} subcategories, {} terms",
            report.categories,
            report.subcategories,
            report.terms
        );
        Ok(report)
    }

    fn write_category(
        &self,
        name: &str,
        allocator: &mut IdAllocator,
        report: &mut InitReport,
    ) -> Result<(), TreeError> {
        let input_dir = self.input.join(name);
        let output_dir = self.output.join(name);
        fs::create_dir_all(&output_dir)?;

        let files = source::subcategory_files(&input_dir)?;

        let mut stems: Vec<String> = files.iter().map(|f| source::file_stem(f)).collect();
        stems.sort();
        let subcategory_rows: Vec<TermRecord> = stems
            .iter()
            .map(|stem| {
                let term = naming::slug_to_display(stem);
                let id = allocator.get_or_create(&term);
                TermRecord::new(term, id)
            })
            .collect();
        report.subcategories += subcategory_rows.len();

        let subcategories_path = output_dir.join(SUBCATEGORIES_FILE);
        tsv::write_records(&subcategories_path, &subcategory_rows)?;
        log::info!("wrote {}", subcategories_path.display());

        for file in &files {
            let stem = source::file_stem(file);
            let terms = source::read_term_lines(&input_dir.join(file))?;
            let rows: Vec<TermRecord> = terms
                .iter()
                .map(|term| TermRecord::new(term.clone(), allocator.get_or_create(term)))
                .collect();
            report.terms += rows.len();

            let leaf_path = output_dir.join(leaf_file(&stem));
            tsv::write_records(&leaf_path, &rows)?;
            log::info!("converted {} ({} terms)", leaf_path.display(), rows.len());
        }
        Ok(())
    }

    /// The output root this initializer writes under.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }
}
