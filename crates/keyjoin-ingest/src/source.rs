//! Per-file keyed row storage.
//!
//! A [`Source`] holds one file's header and a hash index from key value to
//! row slot. Lines that repeat a key are folded into the existing row rather
//! than creating a second one.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::classify::{GroupRules, Schema, classify, file_stem};
use crate::csv::{Delimiter, LineReader, tokenize};
use crate::error::{IngestError, Result};

/// Separator placed between values merged into one cell.
pub const MERGE_SEPARATOR: &str = " || ";

/// How a line whose key already has a row is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Concatenate each cell with [`MERGE_SEPARATOR`] in read order.
    #[default]
    Merge,
    /// Replace the whole row with the latest line.
    KeepLast,
}

/// Options applied while loading a source.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub groups: GroupRules,
    pub duplicates: DuplicatePolicy,
}

impl LoadOptions {
    #[must_use]
    pub fn with_groups(mut self, groups: GroupRules) -> Self {
        self.groups = groups;
        self
    }

    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

/// Counters collected while loading one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Non-blank data lines read after the header.
    pub lines: usize,
    /// Lines folded into an already indexed key.
    pub duplicate_lines: usize,
    /// Lines with too few fields to reach the key column.
    pub short_rows: usize,
    /// Lines whose key field was empty.
    pub empty_keys: usize,
}

/// One indexed entity within a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: String,
    /// Non-key cells in header order; `None` has never received a value.
    cells: Vec<Option<String>>,
}

impl Row {
    fn new(key: String, width: usize) -> Self {
        Self {
            key,
            cells: vec![None; width],
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Cell text at `index`, with unset cells reading as empty.
    pub fn cell(&self, index: usize) -> &str {
        self.cells
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or("")
    }

    fn merge_value(&mut self, index: usize, value: &str) {
        let Some(cell) = self.cells.get_mut(index) else {
            return;
        };
        match cell {
            Some(existing) if !existing.is_empty() => {
                if !value.is_empty() {
                    existing.push_str(MERGE_SEPARATOR);
                    existing.push_str(value);
                }
            }
            _ => *cell = Some(value.to_string()),
        }
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }
}

/// In-memory table for one input file.
#[derive(Debug, Clone)]
pub struct Source {
    path: PathBuf,
    stem: String,
    delimiter: Delimiter,
    key_index: usize,
    group: Option<String>,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Row>,
    stats: LoadStats,
}

impl Source {
    /// Creates an empty source with a fixed schema.
    pub fn new(path: &Path, schema: Schema) -> Self {
        let key_index = if schema.columns.is_empty() {
            0
        } else {
            schema.key_index.min(schema.columns.len() - 1)
        };
        Self {
            path: path.to_path_buf(),
            stem: file_stem(path),
            delimiter: schema.delimiter,
            key_index,
            group: schema.group,
            columns: schema.columns,
            index: HashMap::new(),
            rows: Vec::new(),
            stats: LoadStats::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directory or extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn key_index(&self) -> usize {
        self.key_index
    }

    /// Name of the key column, if the header has any columns.
    pub fn key_column(&self) -> Option<&str> {
        self.columns.get(self.key_index).map(String::as_str)
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Header columns excluding the key column, in original order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(idx, _)| *idx != self.key_index)
            .map(|(_, name)| name.as_str())
    }

    /// Number of non-key columns each row carries.
    pub fn width(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Row> {
        self.index.get(key).map(|&slot| &self.rows[slot])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(Row::key)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Applies one tokenized data line.
    ///
    /// Returns `false` when the line was dropped for being too short to hold
    /// the key or for having an empty key.
    pub fn insert_fields(&mut self, fields: &[String], policy: DuplicatePolicy) -> bool {
        self.stats.lines += 1;
        let Some(key) = fields.get(self.key_index) else {
            self.stats.short_rows += 1;
            return false;
        };
        if key.is_empty() {
            self.stats.empty_keys += 1;
            return false;
        }

        let width = self.width();
        let slot = match self.index.entry(key.clone()) {
            Entry::Occupied(entry) => {
                self.stats.duplicate_lines += 1;
                let slot = *entry.get();
                if policy == DuplicatePolicy::KeepLast {
                    self.rows[slot].clear();
                }
                slot
            }
            Entry::Vacant(entry) => {
                let slot = self.rows.len();
                self.rows.push(Row::new(key.clone(), width));
                entry.insert(slot);
                slot
            }
        };

        let row = &mut self.rows[slot];
        let values = fields
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.key_index)
            .map(|(_, value)| value)
            .take(width);
        for (cell, value) in values.enumerate() {
            row.merge_value(cell, value);
        }
        true
    }
}

/// Loads one delimited file into a [`Source`].
///
/// The header line fixes the delimiter, columns, and key column. A required
/// source with a missing or blank header is an error; a grouped one loads as
/// an empty source.
pub fn load_source(path: &Path, options: &LoadOptions) -> Result<Source> {
    let mut lines = LineReader::open(path)?;
    let header_line = lines.next_line()?.unwrap_or_default();
    let schema = classify(path, &header_line, &options.groups);

    if schema.columns.iter().all(String::is_empty) {
        if schema.group.is_none() {
            return Err(IngestError::EmptyHeader {
                path: path.to_path_buf(),
            });
        }
        warn!(path = %path.display(), "grouped file has an empty header, loading as empty");
        return Ok(Source::new(
            path,
            Schema {
                columns: Vec::new(),
                ..schema
            },
        ));
    }

    let mut source = Source::new(path, schema);
    debug!(
        path = %path.display(),
        delimiter = %source.delimiter(),
        key_column = source.key_column().unwrap_or_default(),
        group = source.group().unwrap_or("-"),
        columns = source.column_count(),
        "classified source"
    );

    while let Some(line) = lines.next_line()? {
        if line.trim().is_empty() {
            continue;
        }
        let fields = tokenize(&line, source.delimiter().as_char());
        if !source.insert_fields(&fields, options.duplicates) {
            trace!(
                path = %path.display(),
                line = lines.line_number(),
                "skipped row without a usable key"
            );
        }
    }

    let stats = source.stats();
    debug!(
        path = %path.display(),
        rows = source.len(),
        lines = stats.lines,
        duplicate_lines = stats.duplicate_lines,
        short_rows = stats.short_rows,
        empty_keys = stats.empty_keys,
        "loaded source"
    );
    Ok(source)
}
