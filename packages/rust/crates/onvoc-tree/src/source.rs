//! Plain-text source tree enumeration.
//!
//! The editable side of the vocabulary is a directory of category folders,
//! each holding `.txt` subcategory files with one term per line. Everything
//! here enumerates in sorted order so that downstream output is
//! deterministic.

use std::fs;
use std::path::Path;

use onvoc_store::tsv;

use crate::error::TreeError;

/// Sorted names of the immediate subdirectories of `root`.
pub fn category_dirs(root: &Path) -> Result<Vec<String>, TreeError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Sorted names of the `.txt` files directly inside a category directory.
pub fn subcategory_files(dir: &Path) -> Result<Vec<String>, TreeError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && tsv::has_extension(&path, "txt") {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Base name of a subcategory file ("Cortex.txt" → "Cortex").
#[must_use]
pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned())
}

/// Non-blank, trimmed lines of a term list file, in file order.
///
/// Duplicates are preserved; whether they collapse is the caller's concern.
pub fn read_term_lines(path: &Path) -> Result<Vec<String>, TreeError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}
