//! Merged output column list.

use std::collections::HashSet;

use keyjoin_ingest::{DEFAULT_KEY_COLUMN, Source};

/// Key column name for the merged output, taken from the first source.
pub fn key_column_name(sources: &[Source]) -> &str {
    sources
        .first()
        .and_then(Source::key_column)
        .unwrap_or(DEFAULT_KEY_COLUMN)
}

/// Builds the merged header.
///
/// The key column comes first, then each source's non-key columns in input
/// order. Grouped sources suffix their column names with `_<tag>`. A name
/// already emitted gets `[<file stem>]` appended.
pub fn build_header(sources: &[Source], key_column: &str) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::from([key_column.to_string()]);
    let mut header = Vec::with_capacity(1 + sources.iter().map(Source::width).sum::<usize>());
    header.push(key_column.to_string());

    for source in sources {
        for name in source.non_key_columns() {
            let candidate = match source.group() {
                Some(tag) => format!("{name}_{tag}"),
                None => name.to_string(),
            };
            let emitted = if used.contains(&candidate) {
                format!("{candidate}[{}]", source.stem())
            } else {
                candidate
            };
            used.insert(emitted.clone());
            header.push(emitted);
        }
    }
    header
}
