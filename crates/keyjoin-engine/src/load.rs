use std::path::PathBuf;
use std::time::Instant;

use keyjoin_ingest::{LoadOptions, Source, load_source};
use tracing::info;

use crate::error::{MergeError, Result};

/// Loads every input in order.
///
/// Loads run one after another; all sources are final before any join
/// stage starts.
pub fn load_sources(paths: &[PathBuf], options: &LoadOptions) -> Result<Vec<Source>> {
    if paths.is_empty() {
        return Err(MergeError::NoInputs);
    }
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let start = Instant::now();
        let source = load_source(path, options)?;
        info!(
            source = source.stem(),
            rows = source.len(),
            columns = source.column_count(),
            grouped = source.is_grouped(),
            duration_ms = start.elapsed().as_millis(),
            "source loaded"
        );
        sources.push(source);
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_inputs() {
        let result = load_sources(&[], &LoadOptions::default());
        assert!(matches!(result, Err(MergeError::NoInputs)));
    }

    #[test]
    fn test_missing_input_propagates() {
        let result = load_sources(
            &[PathBuf::from("/no/such/input.csv")],
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(MergeError::Ingest(_))));
    }
}
