//! Category/subcategory names must not appear as leaf terms.
//!
//! The three levels of the hierarchy share one identifier namespace, so a
//! category or subcategory display name showing up as a term inside a leaf
//! file is almost always an editing mistake. Works on either tree form:
//! `.txt` term lists and `.tsv` record files are both scanned.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use onvoc_store::{naming, tsv};
use onvoc_tree::layout::SUBCATEGORIES_FILE;
use onvoc_tree::source;

use crate::error::CheckError;

/// Which hierarchy level a reserved name comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    /// Top-level category folder name.
    Category,
    /// Subcategory file name.
    Subcategory,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Category => write!(f, "Category"),
            Level::Subcategory => write!(f, "Subcategory"),
        }
    }
}

/// Outcome of one level check.
#[derive(Debug, Default, Serialize)]
pub struct LevelReport {
    /// Human-readable violation lines with file and line/row position.
    pub violations: Vec<String>,
}

impl LevelReport {
    /// Whether no reserved name occurs as a term.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Collect every category and subcategory display name under the root.
fn collect_reserved_names(vocab_root: &Path) -> Result<BTreeMap<String, Level>, CheckError> {
    let mut reserved = BTreeMap::new();
    for category in source::category_dirs(vocab_root)? {
        reserved.insert(naming::slug_to_display(&category), Level::Category);

        let category_dir = vocab_root.join(&category);
        let mut names = Vec::new();
        for entry in fs::read_dir(&category_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_leaf_tsv = tsv::has_extension(&path, "tsv") && name != SUBCATEGORIES_FILE;
            if tsv::has_extension(&path, "txt") || is_leaf_tsv {
                names.push(source::file_stem(&name));
            }
        }
        names.sort();
        for stem in names {
            reserved.insert(naming::slug_to_display(&stem), Level::Subcategory);
        }
    }
    Ok(reserved)
}

fn is_metadata_stem(stem: &str) -> bool {
    stem.eq_ignore_ascii_case("categories") || stem.eq_ignore_ascii_case("subcategories")
}

/// Check that no category or subcategory name occurs as a term.
pub fn check_levels(vocab_root: &Path) -> Result<LevelReport, CheckError> {
    if !vocab_root.is_dir() {
        return Err(CheckError::MissingRoot(vocab_root.to_path_buf()));
    }

    let reserved = collect_reserved_names(vocab_root)?;
    let mut report = LevelReport::default();

    for entry in WalkDir::new(vocab_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if is_metadata_stem(&stem) {
            continue;
        }

        if tsv::has_extension(path, "txt") {
            let content = fs::read_to_string(path)?;
            for (index, line) in content.lines().enumerate() {
                let term = line.trim();
                if term.is_empty() {
                    continue;
                }
                if let Some(level) = reserved.get(term) {
                    report.violations.push(format!(
                        "{level} '{term}' occurs in {} (line {})",
                        path.display(),
                        index + 1
                    ));
                }
            }
        } else if tsv::has_extension(path, "tsv") {
            scan_tsv_terms(path, &reserved, &mut report)?;
        }
    }

    Ok(report)
}

fn scan_tsv_terms(
    path: &Path,
    reserved: &BTreeMap<String, Level>,
    report: &mut LevelReport,
) -> Result<(), CheckError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();
    let Some(first) = lines.next() else {
        return Ok(());
    };
    let header = tsv::split_fields(first);
    let layout = tsv::resolve_columns(&header, path, false)?;

    for (offset, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields = tsv::split_fields(line);
        let Some(cell) = fields.get(layout.term) else {
            continue;
        };
        let term = cell.trim();
        if let Some(level) = reserved.get(term) {
            report.violations.push(format!(
                "{level} '{term}' occurs in {} (row {})",
                path.display(),
                offset + 2
            ));
        }
    }
    Ok(())
}
