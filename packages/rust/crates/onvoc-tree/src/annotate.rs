//! Vocabulary-lookup annotation of term list files.
//!
//! Given directories of plain-text term lists and a vocabulary root, write
//! a sibling `.tsv` beside every `.txt` file with two columns: the term and
//! its vocabulary identifier, blank when the term is not in the vocabulary.
//! Inputs are matched by exact string equality only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use onvoc_store::tsv;

use crate::error::TreeError;
use crate::source;

/// What one annotation run wrote.
#[derive(Debug, Default, Serialize)]
pub struct AnnotateReport {
    /// Output `.tsv` files written, in walk order.
    pub annotated: Vec<PathBuf>,
    /// Term rows that received an identifier.
    pub matched: usize,
    /// Term rows left with a blank identifier.
    pub unmatched: usize,
}

/// Load `term → vocabulary_id` from every `.tsv` under a vocabulary root.
///
/// Later files win on duplicates; a duplicate term bound to a different
/// identifier is logged as a warning, since it means the bijection
/// invariant is already broken upstream.
pub fn load_vocabulary(
    vocab_root: &Path,
    strict: bool,
) -> Result<HashMap<String, String>, TreeError> {
    let mut mapping: HashMap<String, String> = HashMap::new();
    for path in tsv::walk_tsv_files(vocab_root) {
        for record in tsv::read_records(&path, strict)? {
            if let Some(existing) = mapping.get(&record.term) {
                if *existing != record.vocabulary_id {
                    log::warn!(
                        "term '{}' has conflicting ids '{}' vs '{}' in {}",
                        record.term,
                        existing,
                        record.vocabulary_id,
                        path.display()
                    );
                }
            }
            mapping.insert(record.term, record.vocabulary_id);
        }
    }
    Ok(mapping)
}

/// Annotate every `.txt` file under the given folders against a vocabulary.
pub fn annotate_folders(
    folders: &[PathBuf],
    vocab_root: &Path,
    strict: bool,
) -> Result<AnnotateReport, TreeError> {
    if !vocab_root.is_dir() {
        return Err(TreeError::MissingRoot(vocab_root.to_path_buf()));
    }
    let mapping = load_vocabulary(vocab_root, strict)?;
    if mapping.is_empty() {
        log::warn!("no vocabulary terms loaded; all ids will be blank");
    }

    let mut report = AnnotateReport::default();
    for folder in folders {
        if !folder.is_dir() {
            log::warn!("folder '{}' is not a directory, skipping", folder.display());
            continue;
        }
        for entry in WalkDir::new(folder)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !tsv::has_extension(path, "txt") {
                continue;
            }
            annotate_file(path, &mapping, &mut report)?;
        }
    }
    Ok(report)
}

fn annotate_file(
    path: &Path,
    mapping: &HashMap<String, String>,
    report: &mut AnnotateReport,
) -> Result<(), TreeError> {
    let terms = source::read_term_lines(path)?;

    let mut out = String::from("term\tvocabulary_id\n");
    for term in &terms {
        match mapping.get(term) {
            Some(id) => {
                out.push_str(&format!("{term}\t{id}\n"));
                report.matched += 1;
            }
            None => {
                out.push_str(&format!("{term}\t\n"));
                report.unmatched += 1;
            }
        }
    }

    let out_path = path.with_extension("tsv");
    fs::write(&out_path, out)?;
    log::info!("annotated {} -> {}", path.display(), out_path.display());
    report.annotated.push(out_path);
    Ok(())
}
