//! Per-file schema classification: delimiter, key column, and group tag.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::csv::{Delimiter, tokenize};
use crate::error::{IngestError, Result};

/// Key column name used when the first source has no header columns.
pub const DEFAULT_KEY_COLUMN: &str = "patent_id";

const GROUP_MARKER: &str = "claims_";
const GROUP_TAG_LEN: usize = 4;

/// Schema decided from a file's path and header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub delimiter: Delimiter,
    /// Header columns in original order.
    pub columns: Vec<String>,
    pub key_index: usize,
    /// Group tag for grouped sources, `None` for required ones.
    pub group: Option<String>,
}

/// How sources are assigned to groups.
///
/// By default a file is grouped when its stem contains `claims_` followed by
/// four digits. Explicit entries override that heuristic per file stem.
#[derive(Debug, Clone)]
pub struct GroupRules {
    /// Apply the `claims_YYYY` filename heuristic.
    pub infer_from_names: bool,
    /// File stem to group tag.
    pub explicit: BTreeMap<String, String>,
    /// File stems that are always required.
    pub required: BTreeSet<String>,
}

impl Default for GroupRules {
    fn default() -> Self {
        Self {
            infer_from_names: true,
            explicit: BTreeMap::new(),
            required: BTreeSet::new(),
        }
    }
}

impl GroupRules {
    #[must_use]
    pub fn with_infer_from_names(mut self, enable: bool) -> Self {
        self.infer_from_names = enable;
        self
    }

    /// Parses a `STEM=TAG` override and registers it.
    pub fn with_override(mut self, entry: &str) -> Result<Self> {
        let (stem, tag) = entry
            .split_once('=')
            .map(|(stem, tag)| (stem.trim(), tag.trim()))
            .filter(|(stem, tag)| !stem.is_empty() && !tag.is_empty())
            .ok_or_else(|| IngestError::InvalidGroupOverride {
                value: entry.to_string(),
            })?;
        self.explicit.insert(stem.to_string(), tag.to_string());
        Ok(self)
    }

    #[must_use]
    pub fn with_required(mut self, stem: impl Into<String>) -> Self {
        self.required.insert(stem.into());
        self
    }

    /// Resolves the group tag for `path`, or `None` for a required source.
    pub fn resolve(&self, path: &Path) -> Option<String> {
        let stem = file_stem(path);
        if self.required.contains(&stem) {
            return None;
        }
        if let Some(tag) = self.explicit.get(&stem) {
            return Some(tag.clone());
        }
        if self.infer_from_names {
            group_tag_from_stem(&stem)
        } else {
            None
        }
    }
}

/// Classifies a source from its path and raw header line.
pub fn classify(path: &Path, header_line: &str, rules: &GroupRules) -> Schema {
    let delimiter = detect_delimiter(header_line);
    let columns = tokenize(header_line, delimiter.as_char());
    let key_index = detect_key_column(&columns);
    Schema {
        delimiter,
        columns,
        key_index,
        group: rules.resolve(path),
    }
}

/// Tab when the header has a tab and no comma, comma otherwise.
pub fn detect_delimiter(header_line: &str) -> Delimiter {
    if header_line.contains('\t') && !header_line.contains(',') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

/// Picks the join key column by case-insensitive name heuristics.
///
/// Priority: a name containing `application_number`; then one containing
/// `patent` with `number` or `id`; then the first containing `app` and
/// `number`; then column 0.
pub fn detect_key_column(columns: &[String]) -> usize {
    let lowered: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();

    if let Some(idx) = lowered
        .iter()
        .position(|name| name.contains("application_number"))
    {
        return idx;
    }
    if let Some(idx) = lowered
        .iter()
        .position(|name| name.contains("patent") && (name.contains("number") || name.contains("id")))
    {
        return idx;
    }
    lowered
        .iter()
        .position(|name| name.contains("app") && name.contains("number"))
        .unwrap_or(0)
}

/// File name without directory or final extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extracts the four-digit tag following `claims_` (case-insensitive).
pub fn group_tag_from_stem(stem: &str) -> Option<String> {
    let lowered = stem.to_ascii_lowercase();
    lowered.match_indices(GROUP_MARKER).find_map(|(start, _)| {
        let digits = lowered.get(start + GROUP_MARKER.len()..)?;
        let tag = digits.get(..GROUP_TAG_LEN)?;
        tag.bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| tag.to_string())
    })
}
