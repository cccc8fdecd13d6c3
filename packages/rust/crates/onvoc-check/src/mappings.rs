//! Mapping-file consistency check against the vocabulary.
//!
//! Mapping files pair vocabulary terms with terms from an external
//! vocabulary; their `vocabulary_id`/`vocabulary_term` columns must agree
//! with the tree. Files lacking the required columns are skipped rather
//! than failed, since the mappings folder may hold tables in other shapes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use onvoc_store::tsv;
use onvoc_tree::layout::SUBCATEGORIES_FILE;

use crate::error::CheckError;

/// Columns a validatable mapping file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["vocabulary_term", "vocabulary_id", "mesh_term", "mesh_id"];

/// Outcome for one mapping file.
#[derive(Debug, Default, Serialize)]
pub struct MappingFileReport {
    /// The mapping file.
    pub path: PathBuf,
    /// Whether the file was skipped for lacking the required columns.
    pub skipped: bool,
    /// Data rows inspected.
    pub rows: usize,
    /// Row-level findings, with 1-based row numbers counting the header.
    pub errors: Vec<String>,
}

/// Outcome of one mappings check.
#[derive(Debug, Default, Serialize)]
pub struct MappingReport {
    /// Distinct identifiers loaded from the vocabulary.
    pub vocabulary_size: usize,
    /// Per-file outcomes, in sorted file order.
    pub files: Vec<MappingFileReport>,
}

impl MappingReport {
    /// Whether every validated mapping row agrees with the vocabulary.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files.iter().all(|f| f.errors.is_empty())
    }

    /// Total row-level findings across all files.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.errors.len()).sum()
    }

    /// Files skipped for lacking the required columns.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| f.skipped).count()
    }
}

/// Load `vocabulary_id → term` from every leaf `.tsv` under the
/// vocabulary root, skipping the subcategory listings.
///
/// A duplicate identifier bound to a different term is logged as a
/// warning; the later file wins, matching read order.
pub fn load_vocabulary_ids(
    vocab_root: &Path,
    strict: bool,
) -> Result<HashMap<String, String>, CheckError> {
    let mut map: HashMap<String, String> = HashMap::new();
    for path in tsv::walk_tsv_files(vocab_root) {
        if path
            .file_name()
            .is_some_and(|n| n.to_string_lossy() == SUBCATEGORIES_FILE)
        {
            continue;
        }
        for record in tsv::read_records(&path, strict)? {
            if record.vocabulary_id.is_empty() {
                continue;
            }
            if let Some(existing) = map.get(&record.vocabulary_id) {
                if *existing != record.term {
                    log::warn!(
                        "duplicate id {} bound to '{}' and '{}' (in {})",
                        record.vocabulary_id,
                        existing,
                        record.term,
                        path.display()
                    );
                }
            }
            map.insert(record.vocabulary_id, record.term);
        }
    }
    Ok(map)
}

fn validate_mapping_file(
    path: &Path,
    vocabulary: &HashMap<String, String>,
) -> Result<MappingFileReport, CheckError> {
    let mut report = MappingFileReport {
        path: path.to_path_buf(),
        ..MappingFileReport::default()
    };

    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();
    let Some(first) = lines.next() else {
        report.skipped = true;
        return Ok(report);
    };
    let header = tsv::split_fields(first);

    let mut columns = HashMap::new();
    for name in REQUIRED_COLUMNS {
        match header.iter().position(|c| *c == name) {
            Some(index) => {
                columns.insert(name, index);
            }
            None => {
                report.skipped = true;
                return Ok(report);
            }
        }
    }
    let id_index = columns["vocabulary_id"];
    let term_index = columns["vocabulary_term"];

    for (offset, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let row_number = offset + 2;
        report.rows += 1;
        let fields = tsv::split_fields(line);
        let id = fields.get(id_index).map_or("", |f| f.trim());
        let term = fields.get(term_index).map_or("", |f| f.trim());

        if id.is_empty() {
            report
                .errors
                .push(format!("Row {row_number}: Empty vocabulary_id"));
            continue;
        }
        if term.is_empty() {
            report
                .errors
                .push(format!("Row {row_number}: Empty vocabulary_term"));
            continue;
        }
        let Some(expected) = vocabulary.get(id) else {
            report.errors.push(format!(
                "Row {row_number}: id '{id}' not found in vocabulary"
            ));
            continue;
        };
        if term != expected {
            report.errors.push(format!(
                "Row {row_number}: term mismatch for {id}: mapping has '{term}', vocabulary has '{expected}'"
            ));
        }
    }

    Ok(report)
}

/// Validate every `.tsv` directly inside `mappings_dir` against the
/// vocabulary under `vocab_root`.
pub fn check_mappings(
    vocab_root: &Path,
    mappings_dir: &Path,
    strict: bool,
) -> Result<MappingReport, CheckError> {
    if !vocab_root.is_dir() {
        return Err(CheckError::MissingRoot(vocab_root.to_path_buf()));
    }
    if !mappings_dir.is_dir() {
        return Err(CheckError::MissingRoot(mappings_dir.to_path_buf()));
    }

    let vocabulary = load_vocabulary_ids(vocab_root, strict)?;
    log::info!("loaded {} vocabulary identifiers", vocabulary.len());

    let mut files: Vec<PathBuf> = fs::read_dir(mappings_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && tsv::has_extension(path, "tsv"))
        .collect();
    files.sort();

    let mut report = MappingReport {
        vocabulary_size: vocabulary.len(),
        ..MappingReport::default()
    };
    for path in files {
        let file_report = validate_mapping_file(&path, &vocabulary)?;
        if file_report.skipped {
            log::debug!("skipped {} (missing required columns)", path.display());
        }
        report.files.push(file_report);
    }
    Ok(report)
}
