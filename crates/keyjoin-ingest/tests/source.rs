//! Integration tests for loading sources from disk.

use std::fs;
use std::path::{Path, PathBuf};

use keyjoin_ingest::{
    Delimiter, DuplicatePolicy, GroupRules, IngestError, LoadOptions, load_source,
};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_comma_source_with_merged_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "grants.csv",
        "title,patent_number,status\nWidget,P1,active\n\nGadget,P2,expired\nWidget v2,P1,lapsed\n",
    );

    let source = load_source(&path, &LoadOptions::default()).expect("load");

    assert_eq!(source.delimiter(), Delimiter::Comma);
    assert_eq!(source.key_column(), Some("patent_number"));
    assert_eq!(source.len(), 2);
    assert!(!source.is_grouped());
    let row = source.get("P1").expect("P1 row");
    assert_eq!(row.cell(0), "Widget || Widget v2");
    assert_eq!(row.cell(1), "active || lapsed");
    assert_eq!(source.stats().lines, 3);
    assert_eq!(source.stats().duplicate_lines, 1);
}

#[test]
fn loads_tab_source_as_group() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "g_claims_2024.tsv",
        "patent_id\tclaim_sequence\tclaim_text\r\nP1\t1\t\"A device, comprising\"\r\n",
    );

    let source = load_source(&path, &LoadOptions::default()).expect("load");

    assert_eq!(source.delimiter(), Delimiter::Tab);
    assert_eq!(source.group(), Some("2024"));
    assert_eq!(source.stem(), "g_claims_2024");
    assert_eq!(source.get("P1").unwrap().cell(1), "A device, comprising");
}

#[test]
fn keep_last_policy_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a.csv", "id,x\n1,a\n1,b\n");
    let options = LoadOptions::default().with_duplicates(DuplicatePolicy::KeepLast);

    let source = load_source(&path, &options).expect("load");
    assert_eq!(source.get("1").unwrap().cell(0), "b");
}

#[test]
fn required_empty_header_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write(dir.path(), "empty.csv", "");
    let blank = write(dir.path(), "blank.csv", "\n1,2\n");

    for path in [empty, blank] {
        let result = load_source(&path, &LoadOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyHeader { .. })));
    }
}

#[test]
fn grouped_empty_header_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "claims_2020.csv", "");

    let source = load_source(&path, &LoadOptions::default()).expect("load");
    assert!(source.is_empty());
    assert_eq!(source.column_count(), 0);
    assert_eq!(source.width(), 0);
}

#[test]
fn explicit_group_rules_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "claims_2020.csv", "id,z\n1,e\n");
    let groups = GroupRules::default().with_required("claims_2020");

    let source = load_source(&path, &LoadOptions::default().with_groups(groups)).expect("load");
    assert!(!source.is_grouped());
}

#[test]
fn missing_file_is_reported() {
    let result = load_source(Path::new("/no/such/file.csv"), &LoadOptions::default());
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}
