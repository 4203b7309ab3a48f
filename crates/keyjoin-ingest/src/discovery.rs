//! Input path expansion.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

const DELIMITED_EXTENSIONS: [&str; 2] = ["csv", "tsv"];

/// Lists all `.csv` and `.tsv` files in a directory.
///
/// Returns files sorted by filename.
pub fn list_delimited_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_delimited = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                DELIMITED_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_delimited {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expands command-line inputs in order, replacing directories with their
/// delimited files. Plain file paths pass through unchanged.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.is_dir() {
            files.extend(list_delimited_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
