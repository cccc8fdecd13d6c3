//! Identifier format and allocation.
//!
//! A vocabulary identifier is `PREFIX:NNNNNNN` - a configurable prefix, a
//! colon, and a 7-digit zero-padded decimal number. The allocator is an
//! explicit object owned by the caller of a run, constructed from an
//! explicit seed; there is no process-global counter, so concurrent or
//! repeated runs in tests stay isolated.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::StoreError;
use crate::tsv;

/// Default identifier prefix.
pub const DEFAULT_PREFIX: &str = "ONVOC";

/// Number of decimal digits in the zero-padded numeric part.
pub const ID_DIGITS: usize = 7;

/// Largest number that still fits the zero-padded form.
const ID_CEILING: u64 = 9_999_999;

/// Lexical form of vocabulary identifiers for one prefix.
#[derive(Debug, Clone)]
pub struct IdFormat {
    prefix: String,
    pattern: Regex,
}

impl IdFormat {
    /// Build the format for a prefix.
    pub fn new(prefix: &str) -> Result<Self, StoreError> {
        let pattern = Regex::new(&format!(
            r"^{}:(\d{{{}}})$",
            regex::escape(prefix),
            ID_DIGITS
        ))
        .map_err(|_| StoreError::InvalidPrefix(prefix.to_string()))?;
        Ok(Self {
            prefix: prefix.to_string(),
            pattern,
        })
    }

    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render a numeric value as `PREFIX:NNNNNNN`.
    #[must_use]
    pub fn format(&self, n: u64) -> String {
        format!("{}:{:0width$}", self.prefix, n, width = ID_DIGITS)
    }

    /// Extract the numeric value of a well-formed identifier, or `None`
    /// for anything that does not match this prefix and width exactly.
    #[must_use]
    pub fn parse(&self, id: &str) -> Option<u64> {
        self.pattern.captures(id)?.get(1)?.as_str().parse().ok()
    }
}

/// Run-scoped identifier allocator.
///
/// Produces strictly increasing numbers starting at `seed + 1`. Identifiers
/// are never reused within a run; across runs, uniqueness comes from
/// seeding with [`scan_max_id`] over the existing tree.
#[derive(Debug)]
pub struct IdAllocator {
    format: IdFormat,
    next: u64,
    assigned: HashMap<String, String>,
}

impl IdAllocator {
    /// Create an allocator whose first allocation is `seed + 1`.
    #[must_use]
    pub fn new(format: IdFormat, seed: u64) -> Self {
        Self {
            format,
            next: seed + 1,
            assigned: HashMap::new(),
        }
    }

    /// Allocate a fresh identifier unconditionally.
    pub fn allocate(&mut self) -> String {
        if self.next == ID_CEILING + 1 {
            log::warn!(
                "identifier space passed {ID_DIGITS} digits; '{}' no longer matches the expected form",
                self.format.format(self.next)
            );
        }
        let id = self.format.format(self.next);
        self.next += 1;
        id
    }

    /// Return the identifier already assigned to `term` during this run,
    /// or allocate a new one.
    ///
    /// Memoized by exact string equality, so identical strings anywhere in
    /// one run share one identifier regardless of tree level.
    pub fn get_or_create(&mut self, term: &str) -> String {
        if let Some(id) = self.assigned.get(term) {
            return id.clone();
        }
        let id = self.allocate();
        self.assigned.insert(term.to_string(), id.clone());
        id
    }

    /// The format this allocator renders identifiers with.
    #[must_use]
    pub fn id_format(&self) -> &IdFormat {
        &self.format
    }
}

/// Maximum numeric identifier found in any `.tsv` under `root` (0 if none).
///
/// Scans the identifier column of every file, ignoring values that do not
/// match the prefix and width exactly. Used to seed the allocator before a
/// synchronization run so new allocations exceed every prior one.
pub fn scan_max_id(root: &Path, format: &IdFormat, strict: bool) -> Result<u64, StoreError> {
    let mut max = 0;
    for path in tsv::walk_tsv_files(root) {
        let content = fs::read_to_string(&path)?;
        let mut lines = content.lines();
        let Some(first) = lines.next() else {
            if strict {
                return Err(StoreError::MissingHeader(path.clone()));
            }
            continue;
        };
        let header = tsv::split_fields(first);
        let layout = tsv::resolve_columns(&header, &path, strict)?;
        for (index, line) in lines.enumerate() {
            if line.is_empty() {
                continue;
            }
            let fields = tsv::split_fields(line);
            let Some(cell) = fields.get(layout.id) else {
                if strict {
                    return Err(StoreError::ShortRow {
                        path: path.clone(),
                        row: index + 2,
                        found: fields.len(),
                        needed: layout.id + 1,
                    });
                }
                continue;
            };
            if let Some(n) = format.parse(cell.trim()) {
                max = max.max(n);
            }
        }
    }
    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_is_zero_padded() {
        let format = IdFormat::new("TEST").unwrap();
        assert_eq!(format.format(1), "TEST:0000001");
        assert_eq!(format.format(42), "TEST:0000042");
    }

    #[test]
    fn test_parse_accepts_only_exact_form() {
        let format = IdFormat::new("TEST").unwrap();
        assert_eq!(format.parse("TEST:0000042"), Some(42));
        assert_eq!(format.parse("TEST:42"), None);
        assert_eq!(format.parse("OTHER:0000042"), None);
        assert_eq!(format.parse("TEST:00000042"), None);
        assert_eq!(format.parse(""), None);
    }

    #[test]
    fn test_parse_escapes_prefix() {
        // A prefix containing regex metacharacters must match literally.
        let format = IdFormat::new("A.B").unwrap();
        assert_eq!(format.parse("A.B:0000007"), Some(7));
        assert_eq!(format.parse("AXB:0000007"), None);
    }

    #[test]
    fn test_allocator_starts_past_seed() {
        let format = IdFormat::new("TEST").unwrap();
        let mut allocator = IdAllocator::new(format, 10);
        assert_eq!(allocator.allocate(), "TEST:0000011");
        assert_eq!(allocator.allocate(), "TEST:0000012");
    }

    #[test]
    fn test_get_or_create_is_memoized() {
        let format = IdFormat::new("TEST").unwrap();
        let mut allocator = IdAllocator::new(format, 0);
        let first = allocator.get_or_create("Cortex");
        let second = allocator.get_or_create("Cortex");
        let other = allocator.get_or_create("Amygdala");
        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(other, "TEST:0000002");
    }

    #[test]
    fn test_memoization_is_case_sensitive() {
        let format = IdFormat::new("TEST").unwrap();
        let mut allocator = IdAllocator::new(format, 0);
        let lower = allocator.get_or_create("cortex");
        let upper = allocator.get_or_create("Cortex");
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_scan_max_id_over_tree() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("Brain_Structures")).unwrap();
        std::fs::write(
            dir.path().join("Categories.tsv"),
            "term\tvocabulary_id\tcomment\nBrain Structures\tTEST:0000001\t\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Brain_Structures/Cortex.tsv"),
            "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000031\t\nStray\tOTHER:0000099\t\n",
        )
        .unwrap();

        let format = IdFormat::new("TEST").unwrap();
        assert_eq!(scan_max_id(dir.path(), &format, false).unwrap(), 31);
    }

    #[test]
    fn test_scan_max_id_empty_tree_is_zero() {
        let dir = TempDir::new().unwrap();
        let format = IdFormat::new("TEST").unwrap();
        assert_eq!(scan_max_id(dir.path(), &format, false).unwrap(), 0);
    }
}
