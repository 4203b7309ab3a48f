//! Line-at-a-time file reading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Reads physical lines from a source, stripping line endings.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, and a
/// UTF-8 BOM at the start of the first line is dropped.
pub struct LineReader<R> {
    inner: R,
    path: PathBuf,
    buf: Vec<u8>,
    line_number: usize,
}

impl LineReader<BufReader<File>> {
    /// Opens `path` for buffered line reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, path: &Path) -> Self {
        Self {
            inner,
            path: path.to_path_buf(),
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Number of lines returned so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the next line without its `\n`/`\r\n` terminator.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let read = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| IngestError::FileRead {
                path: self.path.clone(),
                source: e,
            })?;
        if read == 0 {
            return Ok(None);
        }
        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }
        self.line_number += 1;
        let line = String::from_utf8_lossy(&self.buf);
        let line = if self.line_number == 1 {
            line.strip_prefix('\u{feff}').unwrap_or(&line).to_string()
        } else {
            line.into_owned()
        };
        Ok(Some(line))
    }
}

/// Reads only the first line of a file.
pub fn read_header_line(path: &Path) -> Result<Option<String>> {
    LineReader::open(path)?.next_line()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn reader(content: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(
            Cursor::new(content.as_bytes().to_vec()),
            Path::new("test.csv"),
        )
    }

    #[test]
    fn test_next_line_strips_terminators() {
        let mut lines = reader("a,b\r\nc,d\n\ne");
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("a,b"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("c,d"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("e"));
        assert_eq!(lines.next_line().unwrap(), None);
        assert_eq!(lines.line_number(), 4);
    }

    #[test]
    fn test_next_line_strips_bom_on_first_line_only() {
        let mut lines = reader("\u{feff}id,x\n\u{feff}1,a\n");
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("id,x"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("\u{feff}1,a"));
    }

    #[test]
    fn test_next_line_replaces_invalid_utf8() {
        let mut lines = LineReader::new(Cursor::new(vec![b'a', 0xFF, b'\n']), Path::new("x"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("a\u{fffd}"));
    }

    #[test]
    fn test_read_header_line() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "id\tname\n1\tx\n").unwrap();
        assert_eq!(
            read_header_line(file.path()).unwrap().as_deref(),
            Some("id\tname")
        );
    }

    #[test]
    fn test_read_header_line_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert_eq!(read_header_line(file.path()).unwrap(), None);
    }

    #[test]
    fn test_open_missing_file() {
        let result = LineReader::open(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
