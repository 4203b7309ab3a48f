//! Keyed source ingestion.
//!
//! This crate turns delimited text files that share an entity key into
//! in-memory [`Source`] tables ready for joining.
//!
//! # Features
//!
//! - **Tokenizing**: Split comma or tab delimited lines with `"` quoting
//! - **Schema Classification**: Detect delimiter, key column, and group tag per file
//! - **Source Tables**: Hash-indexed rows that merge repeated keys into one row
//! - **Input Discovery**: Expand directory arguments into their delimited files
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use keyjoin_ingest::{LoadOptions, load_source};
//!
//! let source = load_source(Path::new("data/claims_2020.csv"), &LoadOptions::default())?;
//! assert_eq!(source.group(), Some("2020"));
//! let row = source.get("US1234567");
//! ```

mod classify;
mod csv;
mod discovery;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Tokenizing ===
pub use csv::{Delimiter, read_header_line, tokenize};

// === Schema Classification ===
pub use classify::{
    DEFAULT_KEY_COLUMN, GroupRules, Schema, classify, detect_delimiter, detect_key_column,
    file_stem, group_tag_from_stem,
};

// === Source Tables ===
pub use source::{
    DuplicatePolicy, LoadOptions, LoadStats, MERGE_SEPARATOR, Row, Source, load_source,
};

// === Input Discovery ===
pub use discovery::{expand_inputs, list_delimited_files};
