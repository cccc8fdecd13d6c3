//! ONVOC tree layer - materialization and synchronization of the
//! vocabulary directory tree.
//!
//! The vocabulary lives in two parallel trees: an editable plain-text
//! source (category folders holding `.txt` files of terms) and an
//! ID-annotated `.tsv` copy derived from it. This crate builds the copy
//! from scratch, reconciles it incrementally, and annotates free-standing
//! term lists against it.
//!
//! # Architecture
//!
//! ```text
//! onvoc-tree/src/
//! ├── lib.rs          # Main module and exports
//! ├── layout.rs       # Copy-tree file names (Categories.tsv, ...)
//! ├── source.rs       # Plain-text source tree enumeration
//! ├── initialize.rs   # TreeInitializer - from-scratch materialization
//! ├── synchronize.rs  # TreeSynchronizer - append-only reconciliation
//! ├── annotate.rs     # Vocabulary-lookup annotation of term lists
//! └── error.rs        # TreeError
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use onvoc_store::IdFormat;
//! use onvoc_tree::{TreeInitializer, TreeSynchronizer};
//!
//! let format = IdFormat::new("ONVOC")?;
//! TreeInitializer::new("terms".into(), "vocabulary".into(), format.clone()).run()?;
//! // Later, after edits to the source tree:
//! let report = TreeSynchronizer::new("terms".into(), "vocabulary".into(), format, false).run()?;
//! println!("{} additions", report.change_count());
//! ```

pub mod annotate;
pub mod error;
pub mod initialize;
pub mod layout;
pub mod source;
pub mod synchronize;

pub use annotate::{AnnotateReport, annotate_folders, load_vocabulary};
pub use error::TreeError;
pub use initialize::{InitReport, TreeInitializer};
pub use synchronize::{SyncReport, TreeSynchronizer};
