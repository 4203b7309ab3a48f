//! Merged record writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Writer, WriterBuilder};
use keyjoin_ingest::Source;

use crate::error::{MergeError, Result};
use crate::header::{build_header, key_column_name};

/// Field separator for the merged output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputDelimiter {
    #[default]
    Comma,
    Tab,
}

impl OutputDelimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// Wraps `writer` in a CSV writer that quotes only fields that need it.
pub fn output_writer<W: Write>(writer: W, delimiter: OutputDelimiter) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer)
}

/// Writes one record per key: the key, then each source's non-key cells.
///
/// A source without a row for the key contributes blank fields, so every
/// record has `1 + sum(source width)` fields. Returns the record count.
pub fn emit_rows<W: Write>(
    writer: &mut Writer<W>,
    sources: &[Source],
    keys: &[String],
) -> csv::Result<usize> {
    let width = 1 + sources.iter().map(Source::width).sum::<usize>();
    let mut record: Vec<&str> = Vec::with_capacity(width);
    for key in keys {
        record.clear();
        record.push(key);
        for source in sources {
            match source.get(key) {
                Some(row) => record.extend((0..source.width()).map(|idx| row.cell(idx))),
                None => record.extend(std::iter::repeat_n("", source.width())),
            }
        }
        writer.write_record(&record)?;
    }
    Ok(keys.len())
}

/// Writes the merged header and rows to any writer.
pub fn write_merged_to<W: Write>(
    writer: W,
    delimiter: OutputDelimiter,
    sources: &[Source],
    keys: &[String],
) -> csv::Result<usize> {
    let mut writer = output_writer(writer, delimiter);
    let header = build_header(sources, key_column_name(sources));
    writer.write_record(&header)?;
    let written = emit_rows(&mut writer, sources, keys)?;
    writer.flush()?;
    Ok(written)
}

/// Creates `path` and writes the merged table into it.
pub fn write_merged(
    path: &Path,
    delimiter: OutputDelimiter,
    sources: &[Source],
    keys: &[String],
) -> Result<usize> {
    let file = File::create(path).map_err(|e| MergeError::OutputCreate {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_merged_to(BufWriter::new(file), delimiter, sources, keys).map_err(|e| {
        MergeError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
