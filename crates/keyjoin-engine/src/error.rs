//! Error types for the join engine.

use std::path::PathBuf;

use keyjoin_ingest::IngestError;
use thiserror::Error;

/// Errors that abort a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No input files were given.
    #[error("no input files given")]
    NoInputs,

    /// A source could not be loaded.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The output file could not be created.
    #[error("failed to create output {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing merged records failed.
    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;
