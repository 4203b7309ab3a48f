//! Delimited text reading.

mod reader;
mod tokenize;

pub use reader::{LineReader, read_header_line};
pub use tokenize::{Delimiter, tokenize};
