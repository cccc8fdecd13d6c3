//! ONVOC term store - TSV records and stable identifier allocation.
//!
//! This crate is the leaf of the vocabulary toolchain: it defines the
//! record format shared by every level of the tree, the identifier lexical
//! form and allocator, and the display-term/file-name conversion.
//!
//! # Architecture
//!
//! ```text
//! onvoc-store/src/
//! ├── lib.rs      # Main module and exports
//! ├── record.rs   # TermRecord (term, vocabulary_id, comment)
//! ├── tsv.rs      # Header-first TSV read/append/write, strict mode
//! ├── id.rs       # IdFormat, IdAllocator, maximum-identifier tree scan
//! ├── naming.rs   # Display term ↔ folder/file name conversion
//! └── error.rs    # StoreError
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use onvoc_store::{IdAllocator, IdFormat, TermRecord, tsv};
//!
//! let format = IdFormat::new("ONVOC")?;
//! let mut allocator = IdAllocator::new(format, 0);
//! let record = TermRecord::new("Hippocampus".into(), allocator.get_or_create("Hippocampus"));
//! tsv::append_records(Path::new("vocabulary/Brain_Structures/Cortex.tsv"), &[record])?;
//! ```

pub mod error;
pub mod id;
pub mod naming;
pub mod record;
pub mod tsv;

pub use error::StoreError;
pub use id::{DEFAULT_PREFIX, ID_DIGITS, IdAllocator, IdFormat, scan_max_id};
pub use record::TermRecord;
