use std::path::PathBuf;

use keyjoin_ingest::{Delimiter, Schema, Source};

#[derive(Debug)]
pub struct MergeResult {
    pub output: PathBuf,
    /// False for dry runs and runs with no eligible keys.
    pub wrote_output: bool,
    pub sources: Vec<SourceSummary>,
    pub eligible: usize,
    pub requested: usize,
    pub written: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    pub group: Option<String>,
    pub delimiter: Delimiter,
    pub key_column: String,
    pub columns: usize,
    /// Distinct keys; `None` when rows were not loaded.
    pub rows: Option<usize>,
    /// Lines dropped for a short row or empty key.
    pub skipped: Option<usize>,
}

impl SourceSummary {
    pub fn from_source(source: &Source) -> Self {
        let stats = source.stats();
        Self {
            name: source.stem().to_string(),
            group: source.group().map(str::to_string),
            delimiter: source.delimiter(),
            key_column: source.key_column().unwrap_or_default().to_string(),
            columns: source.column_count(),
            rows: Some(source.len()),
            skipped: Some(stats.short_rows + stats.empty_keys),
        }
    }

    pub fn from_schema(name: String, schema: &Schema) -> Self {
        Self {
            name,
            group: schema.group.clone(),
            delimiter: schema.delimiter,
            key_column: schema
                .columns
                .get(schema.key_index)
                .cloned()
                .unwrap_or_default(),
            columns: schema.columns.len(),
            rows: None,
            skipped: None,
        }
    }

    pub fn role(&self) -> String {
        match &self.group {
            Some(tag) => format!("group {tag}"),
            None => "required".to_string(),
        }
    }
}
