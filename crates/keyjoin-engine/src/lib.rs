//! Multi-source keyed join engine.
//!
//! Given the [`Source`](keyjoin_ingest::Source) tables loaded by
//! `keyjoin-ingest`, this crate decides which keys are eligible, samples
//! them, and writes one merged delimited table.
//!
//! Stages run in this order:
//! 1. **Load**: [`load_sources`] reads every input file
//! 2. **Eligibility**: [`compute_eligible`] intersects required sources and
//!    filters by the union of grouped sources
//! 3. **Sample**: [`sample_keys`] draws a uniform subset without replacement
//! 4. **Write**: [`build_header`] and [`emit_rows`] produce the merged output

mod eligibility;
mod emit;
mod error;
mod header;
mod load;
mod options;
mod sample;

pub use eligibility::compute_eligible;
pub use emit::{OutputDelimiter, emit_rows, output_writer, write_merged, write_merged_to};
pub use error::{MergeError, Result};
pub use header::{build_header, key_column_name};
pub use load::load_sources;
pub use options::{DEFAULT_OUTPUT, DEFAULT_SAMPLE_SIZE, MergeOptions};
pub use sample::{sample_keys, seeded_rng};
