//! TSV reading and writing for vocabulary files.
//!
//! Every vocabulary file is a tab-separated table with a mandatory header
//! row. Columns are resolved by header name so that reordered or legacy
//! four-column files (with a `mapping_id` column) still parse; when the
//! expected names are absent the reader falls back to positions 0/1.
//!
//! Two parsing modes:
//! - lenient (default): rows shorter than the resolved layout are skipped
//!   without a diagnostic, and a missing/misnamed header falls back to the
//!   positional assumption.
//! - strict: the same conditions are typed errors, so corrupt files fail at
//!   read time instead of surfacing later through a validator.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::StoreError;
use crate::record::TermRecord;

/// Header name of the display-term column.
pub const TERM_COLUMN: &str = "term";
/// Header name of the identifier column.
pub const ID_COLUMN: &str = "vocabulary_id";
/// Header name of the free-text comment column.
pub const COMMENT_COLUMN: &str = "comment";

/// Header row written to every vocabulary TSV file.
pub const VOCAB_HEADER: [&str; 3] = [TERM_COLUMN, ID_COLUMN, COMMENT_COLUMN];

/// Resolved field positions for one file.
#[derive(Debug, Clone, Copy)]
pub struct ColumnLayout {
    /// Index of the term field.
    pub term: usize,
    /// Index of the identifier field.
    pub id: usize,
    /// Index of the comment field, when the header names one.
    pub comment: Option<usize>,
}

impl ColumnLayout {
    /// Minimum field count a data row needs under this layout.
    #[must_use]
    pub fn needed(&self) -> usize {
        self.term.max(self.id) + 1
    }
}

/// Split one line into its tab-separated fields.
#[must_use]
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

fn header_line() -> String {
    VOCAB_HEADER.join("\t")
}

fn record_line(record: &TermRecord) -> String {
    format!(
        "{}\t{}\t{}",
        record.term, record.vocabulary_id, record.comment
    )
}

/// Locate the term and identifier columns in a header row.
///
/// Both names must be present to use the header positions; otherwise the
/// lenient fallback assumes term at 0 and identifier at 1, and strict mode
/// reports whichever name is missing.
pub fn resolve_columns(
    header: &[&str],
    path: &Path,
    strict: bool,
) -> Result<ColumnLayout, StoreError> {
    let term = header.iter().position(|c| *c == TERM_COLUMN);
    let id = header.iter().position(|c| *c == ID_COLUMN);
    let comment = header.iter().position(|c| *c == COMMENT_COLUMN);

    match (term, id) {
        (Some(term), Some(id)) => Ok(ColumnLayout { term, id, comment }),
        _ if strict => {
            let column = if term.is_none() { TERM_COLUMN } else { ID_COLUMN };
            Err(StoreError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
        }
        // Fallback: term at 0, vocabulary_id at 1, comment at 2.
        _ => Ok(ColumnLayout {
            term: 0,
            id: 1,
            comment: Some(2),
        }),
    }
}

/// Read every well-formed record from a vocabulary TSV file.
///
/// Rows with an empty term are skipped in both modes; short rows are
/// skipped in lenient mode and are an error in strict mode.
pub fn read_records(path: &Path, strict: bool) -> Result<Vec<TermRecord>, StoreError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    let Some(first) = lines.next() else {
        if strict {
            return Err(StoreError::MissingHeader(path.to_path_buf()));
        }
        return Ok(Vec::new());
    };
    let header = split_fields(first);
    let layout = resolve_columns(&header, path, strict)?;

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() < layout.needed() {
            if strict {
                return Err(StoreError::ShortRow {
                    path: path.to_path_buf(),
                    row: index + 2,
                    found: fields.len(),
                    needed: layout.needed(),
                });
            }
            continue;
        }
        let term = fields[layout.term].trim();
        if term.is_empty() {
            continue;
        }
        let comment = layout
            .comment
            .and_then(|i| fields.get(i))
            .map_or_else(String::new, |c| (*c).to_string());
        records.push(TermRecord {
            term: term.to_string(),
            vocabulary_id: fields[layout.id].trim().to_string(),
            comment,
        });
    }
    Ok(records)
}

/// Load `term → vocabulary_id` from a vocabulary TSV file.
///
/// A missing file yields an empty map: callers treat absence as "nothing
/// assigned yet", which is a normal state during synchronization.
pub fn load_term_map(path: &Path, strict: bool) -> Result<HashMap<String, String>, StoreError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let mut map = HashMap::new();
    for record in read_records(path, strict)? {
        if record.vocabulary_id.is_empty() {
            continue;
        }
        map.insert(record.term, record.vocabulary_id);
    }
    Ok(map)
}

/// Write a complete vocabulary TSV file: header plus one line per record.
///
/// Creates parent directories as needed and overwrites any existing file.
pub fn write_records(path: &Path, records: &[TermRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = String::new();
    out.push_str(&header_line());
    out.push('\n');
    for record in records {
        out.push_str(&record_line(record));
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

/// Append records to a vocabulary TSV file, creating it with a header row
/// first when absent.
///
/// Existing rows are never rewritten or reordered. Passing an empty slice
/// materializes an empty file that carries only the header.
pub fn append_records(path: &Path, records: &[TermRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let exists = path.is_file();
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let mut buf = String::new();
    if !exists {
        buf.push_str(&header_line());
        buf.push('\n');
    }
    for record in records {
        buf.push_str(&record_line(record));
        buf.push('\n');
    }
    file.write_all(buf.as_bytes())?;
    Ok(())
}

/// Case-insensitive extension test (`.tsv` files may appear as `.TSV`).
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Every `.tsv` file under `root`, recursively, in sorted path order.
#[must_use]
pub fn walk_tsv_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| has_extension(path, "tsv"))
        .collect();
    files.sort();
    files
}
