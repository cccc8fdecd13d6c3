//! ONVOC validators - read-only consistency gates over the vocabulary.
//!
//! Every checker walks the tree (or a pair of trees), builds a report of
//! findings, and mutates nothing. A clean report means the invariant
//! holds; the CLI maps a non-clean report to a non-zero exit.
//!
//! # Architecture
//!
//! ```text
//! onvoc-check/src/
//! ├── lib.rs             # Main module and exports
//! ├── ids.rs             # Term ↔ identifier bijection
//! ├── categories.rs      # Listing ↔ folder/file completeness
//! ├── synchronization.rs # Source tree ↔ copy tree drift audit
//! ├── mappings.rs        # Mapping files vs vocabulary identifiers
//! ├── levels.rs          # Category/subcategory names used as terms
//! └── error.rs           # CheckError
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use onvoc_check::check_ids;
//!
//! let report = check_ids(Path::new("vocabulary"), false)?;
//! if !report.is_clean() {
//!     for line in report.findings() {
//!         eprintln!("{line}");
//!     }
//! }
//! ```

pub mod categories;
pub mod error;
pub mod ids;
pub mod levels;
pub mod mappings;
pub mod synchronization;

pub use categories::{StructureReport, check_categories};
pub use error::CheckError;
pub use ids::{IdConflict, IdReport, TermConflict, check_ids};
pub use levels::{Level, LevelReport, check_levels};
pub use mappings::{MappingFileReport, MappingReport, check_mappings, load_vocabulary_ids};
pub use synchronization::{DriftReport, check_synchronization};
