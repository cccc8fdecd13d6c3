//! Listing ↔ folder/file structural completeness check.
//!
//! Every category term in `Categories.tsv` must have a folder, every
//! folder must be listed, and within each category the same bidirectional
//! check runs between `Subcategories.tsv` and the leaf `.tsv` files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use onvoc_store::{naming, tsv};
use onvoc_tree::layout::{CATEGORIES_FILE, SUBCATEGORIES_FILE};

use crate::error::CheckError;

/// Outcome of one structure check.
#[derive(Debug, Default, Serialize)]
pub struct StructureReport {
    /// Human-readable structural findings, in discovery order.
    pub findings: Vec<String>,
}

impl StructureReport {
    /// Whether the tree structure is complete on both sides.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

fn list_dirs(root: &Path) -> Result<BTreeSet<String>, CheckError> {
    let mut dirs = BTreeSet::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.path().is_dir() {
            dirs.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(dirs)
}

fn list_leaf_tsv_files(dir: &Path) -> Result<BTreeSet<String>, CheckError> {
    let mut files = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_file() && tsv::has_extension(&path, "tsv") && name != SUBCATEGORIES_FILE {
            files.insert(name);
        }
    }
    Ok(files)
}

/// Check that listings and the directory tree agree in both directions.
pub fn check_categories(vocabulary: &Path, strict: bool) -> Result<StructureReport, CheckError> {
    if !vocabulary.is_dir() {
        return Err(CheckError::MissingRoot(vocabulary.to_path_buf()));
    }

    let mut report = StructureReport::default();

    let categories_path = vocabulary.join(CATEGORIES_FILE);
    if !categories_path.is_file() {
        report.findings.push(format!(
            "Missing {} in vocabulary: {}",
            CATEGORIES_FILE,
            vocabulary.display()
        ));
        // Nothing further can be checked without the root listing.
        return Ok(report);
    }

    let category_terms = tsv::read_records(&categories_path, strict)?;
    let expected_folders: BTreeSet<String> = category_terms
        .iter()
        .map(|r| naming::display_to_slug(&r.term))
        .collect();
    let actual_folders = list_dirs(vocabulary)?;

    for folder in expected_folders.difference(&actual_folders) {
        report.findings.push(format!(
            "Category listed in {CATEGORIES_FILE} not found as folder: '{folder}'"
        ));
    }
    for folder in actual_folders.difference(&expected_folders) {
        report.findings.push(format!(
            "Extra folder under vocabulary not in {CATEGORIES_FILE}: '{folder}'"
        ));
    }

    for category in expected_folders.intersection(&actual_folders) {
        let category_dir = vocabulary.join(category);

        let subcategories_path = category_dir.join(SUBCATEGORIES_FILE);
        if !subcategories_path.is_file() {
            report.findings.push(format!(
                "Missing {} in category folder: '{}'",
                SUBCATEGORIES_FILE,
                category_dir.display()
            ));
            continue;
        }

        let subcategory_terms = tsv::read_records(&subcategories_path, strict)?;
        let expected_files: BTreeSet<String> = subcategory_terms
            .iter()
            .map(|r| format!("{}.tsv", naming::display_to_slug(&r.term)))
            .collect();
        let actual_files = list_leaf_tsv_files(&category_dir)?;

        for file in expected_files.difference(&actual_files) {
            report.findings.push(format!(
                "Subcategory '{}' listed in {} missing in folder '{}'",
                file,
                subcategories_path.display(),
                category_dir.display()
            ));
        }
        for file in actual_files.difference(&expected_files) {
            report.findings.push(format!(
                "Extra .tsv file in '{}' not listed in {}: '{}'",
                category_dir.display(),
                SUBCATEGORIES_FILE,
                file
            ));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_complete_tree(root: &Path) {
        fs::create_dir_all(root.join("Brain_Structures")).unwrap();
        fs::write(
            root.join("Categories.tsv"),
            "term\tvocabulary_id\tcomment\nBrain Structures\tTEST:0000001\t\n",
        )
        .unwrap();
        fs::write(
            root.join("Brain_Structures/Subcategories.tsv"),
            "term\tvocabulary_id\tcomment\nCortex\tTEST:0000002\t\n",
        )
        .unwrap();
        fs::write(
            root.join("Brain_Structures/Cortex.tsv"),
            "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000003\t\n",
        )
        .unwrap();
    }

    #[test]
    fn test_complete_tree_is_clean() {
        let dir = TempDir::new().unwrap();
        write_complete_tree(dir.path());
        let report = check_categories(dir.path(), false).unwrap();
        assert!(report.is_clean(), "unexpected: {:?}", report.findings);
    }

    #[test]
    fn test_missing_categories_listing_short_circuits() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Orphan")).unwrap();

        let report = check_categories(dir.path(), false).unwrap();
        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].starts_with("Missing Categories.tsv"));
    }

    #[test]
    fn test_listed_category_without_folder() {
        let dir = TempDir::new().unwrap();
        write_complete_tree(dir.path());
        fs::remove_dir_all(dir.path().join("Brain_Structures")).unwrap();

        let report = check_categories(dir.path(), false).unwrap();
        assert!(
            report
                .findings
                .iter()
                .any(|f| f.contains("not found as folder: 'Brain_Structures'"))
        );
    }

    #[test]
    fn test_unlisted_folder_is_extra() {
        let dir = TempDir::new().unwrap();
        write_complete_tree(dir.path());
        fs::create_dir_all(dir.path().join("Unlisted_Topic")).unwrap();

        let report = check_categories(dir.path(), false).unwrap();
        assert!(
            report
                .findings
                .iter()
                .any(|f| f.contains("Extra folder") && f.contains("Unlisted_Topic"))
        );
    }

    #[test]
    fn test_missing_leaf_and_extra_leaf() {
        let dir = TempDir::new().unwrap();
        write_complete_tree(dir.path());
        fs::remove_file(dir.path().join("Brain_Structures/Cortex.tsv")).unwrap();
        fs::write(
            dir.path().join("Brain_Structures/Rogue.tsv"),
            "term\tvocabulary_id\tcomment\n",
        )
        .unwrap();

        let report = check_categories(dir.path(), false).unwrap();
        assert!(
            report
                .findings
                .iter()
                .any(|f| f.contains("Subcategory 'Cortex.tsv'") && f.contains("missing"))
        );
        assert!(
            report
                .findings
                .iter()
                .any(|f| f.contains("Extra .tsv file") && f.contains("Rogue.tsv"))
        );
    }
}
