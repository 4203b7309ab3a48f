//! Join predicate over loaded sources.

use std::collections::HashSet;

use keyjoin_ingest::Source;
use tracing::debug;

/// Computes the keys eligible for output.
///
/// Sources without a group tag are required: a key must appear in every one
/// of them. When any grouped sources exist, the key must also appear in at
/// least one of them. With no required sources the union of grouped keys is
/// eligible, and with no sources at all nothing is.
///
/// The smallest required source is scanned, so keys come back in that
/// source's first-seen order (or grouped first-seen order for the union).
pub fn compute_eligible(sources: &[Source]) -> Vec<String> {
    let (required, grouped): (Vec<&Source>, Vec<&Source>) =
        sources.iter().partition(|source| !source.is_grouped());

    let mut grouped_union: HashSet<&str> = HashSet::new();
    let mut union_order: Vec<&str> = Vec::new();
    for source in &grouped {
        for key in source.keys() {
            if grouped_union.insert(key) {
                union_order.push(key);
            }
        }
    }

    let Some((base_idx, base)) = required
        .iter()
        .enumerate()
        .min_by_key(|(_, source)| source.len())
    else {
        debug!(
            grouped_sources = grouped.len(),
            union = union_order.len(),
            "no required sources, using grouped union"
        );
        return union_order.into_iter().map(str::to_string).collect();
    };

    debug!(
        base = base.stem(),
        base_rows = base.len(),
        required_sources = required.len(),
        grouped_sources = grouped.len(),
        "scanning smallest required source"
    );

    let filter_by_groups = !grouped.is_empty();
    base.keys()
        .filter(|key| {
            required
                .iter()
                .enumerate()
                .all(|(idx, other)| idx == base_idx || other.contains_key(key))
        })
        .filter(|key| !filter_by_groups || grouped_union.contains(key))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use keyjoin_ingest::{Delimiter, DuplicatePolicy, Schema};

    use super::*;

    fn source(stem: &str, group: Option<&str>, keys: &[&str]) -> Source {
        let mut source = Source::new(
            Path::new(&format!("{stem}.csv")),
            Schema {
                delimiter: Delimiter::Comma,
                columns: vec!["id".to_string(), "v".to_string()],
                key_index: 0,
                group: group.map(str::to_string),
            },
        );
        for key in keys {
            source.insert_fields(&[(*key).to_string(), "x".to_string()], DuplicatePolicy::Merge);
        }
        source
    }

    fn sorted(mut keys: Vec<String>) -> Vec<String> {
        keys.sort();
        keys
    }

    #[test]
    fn test_required_intersection() {
        let sources = vec![
            source("A", None, &["1", "2", "3"]),
            source("B", None, &["2", "3", "4"]),
        ];
        assert_eq!(sorted(compute_eligible(&sources)), vec!["2", "3"]);
    }

    #[test]
    fn test_grouped_union_filter() {
        let sources = vec![
            source("A", None, &["1", "2", "3"]),
            source("claims_2020", Some("2020"), &["2"]),
            source("claims_2021", Some("2021"), &["3"]),
        ];
        assert_eq!(sorted(compute_eligible(&sources)), vec!["2", "3"]);
    }

    #[test]
    fn test_only_grouped_sources() {
        let sources = vec![
            source("claims_2020", Some("2020"), &["1", "2"]),
            source("claims_2021", Some("2021"), &["2", "3"]),
        ];
        assert_eq!(compute_eligible(&sources), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_no_sources() {
        assert!(compute_eligible(&[]).is_empty());
    }

    #[test]
    fn test_smallest_required_is_base() {
        let sources = vec![
            source("big", None, &["5", "4", "3", "2", "1"]),
            source("small", None, &["3", "1"]),
        ];
        assert_eq!(compute_eligible(&sources), vec!["3", "1"]);
    }

    #[test]
    fn test_grouped_source_without_overlap_empties_result() {
        let sources = vec![
            source("A", None, &["1", "2"]),
            source("claims_2020", Some("2020"), &["9"]),
        ];
        assert!(compute_eligible(&sources).is_empty());
    }

    #[test]
    fn test_empty_grouped_source_still_filters() {
        let sources = vec![
            source("A", None, &["1", "2"]),
            source("claims_2020", Some("2020"), &[]),
        ];
        assert!(compute_eligible(&sources).is_empty());
    }
}
