//! Single-line field splitting with `"` quoting.

use std::fmt;

/// Field separator detected for a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comma => f.write_str("comma"),
            Self::Tab => f.write_str("tab"),
        }
    }
}

/// Splits one line into fields on `delimiter`.
///
/// A `"` outside a quoted span opens one; inside, `""` yields a literal quote
/// and any other `"` closes the span. Delimiters and newlines inside a quoted
/// span are literal. End of input closes an unterminated span and always
/// emits the current field, so the result is never empty.
pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(tokenize("a,b,c", ','), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_quoted() {
        let result = tokenize(r#""a,b","c""d",e"#, ',');
        assert_eq!(result, vec!["a,b", "c\"d", "e"]);
    }

    #[test]
    fn test_tokenize_empty_line_yields_one_field() {
        assert_eq!(tokenize("", ','), vec![""]);
    }

    #[test]
    fn test_tokenize_trailing_delimiter() {
        assert_eq!(tokenize("a,", ','), vec!["a", ""]);
        assert_eq!(tokenize(",,", ','), vec!["", "", ""]);
    }

    #[test]
    fn test_tokenize_tab_keeps_commas() {
        assert_eq!(tokenize("a,1\tb", '\t'), vec!["a,1", "b"]);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert_eq!(tokenize("x,\"open,still", ','), vec!["x", "open,still"]);
    }

    #[test]
    fn test_tokenize_quote_mid_field() {
        assert_eq!(tokenize("ab\"c,d\"e,f", ','), vec!["abc,de", "f"]);
    }

    #[test]
    fn test_tokenize_quoted_newline_is_literal() {
        assert_eq!(tokenize("\"a\nb\",c", ','), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_tokenize_preserves_whitespace() {
        assert_eq!(tokenize(" a , b ", ','), vec![" a ", " b "]);
    }

    #[test]
    fn test_delimiter_chars() {
        assert_eq!(Delimiter::Comma.as_char(), ',');
        assert_eq!(Delimiter::Tab.as_byte(), b'\t');
        assert_eq!(Delimiter::Tab.to_string(), "tab");
    }
}
