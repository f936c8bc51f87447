//! Key/value tree builder for GML.
//!
//! A GML document is a list of `key value` pairs where a value is a number,
//! a string, or a bracketed list of further pairs. This module only checks
//! that shape; deciding whether the tree describes a graph happens in
//! [`super::GmlGraph::from_document`].

use super::lexer::{Lexer, Token, TokenKind};
use crate::error::LoadError;

/// Deepest list nesting accepted before the input is rejected.
pub const MAX_DEPTH: usize = 128;

/// A parsed GML value.
#[derive(Debug, Clone, PartialEq)]
pub enum GmlValue {
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<GmlPair>),
}

/// One `key value` entry, with the line the key appeared on.
#[derive(Debug, Clone, PartialEq)]
pub struct GmlPair {
    pub key: String,
    pub value: GmlValue,
    pub line: usize,
}

impl GmlValue {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }
}

/// Parse a whole document into its top-level pairs.
///
/// # Errors
///
/// Propagates lexer errors, and reports a stray `]`, an unclosed `[`, a
/// value where a key was expected, or a key with no value.
pub fn parse_document(src: &str) -> Result<Vec<GmlPair>, LoadError> {
    let mut lexer = Lexer::new(src);
    parse_list(&mut lexer, None, 0)
}

/// Parse pairs until the matching `]` (when `opened_at` is set) or EOF.
fn parse_list(
    lexer: &mut Lexer<'_>,
    opened_at: Option<usize>,
    depth: usize,
) -> Result<Vec<GmlPair>, LoadError> {
    if depth > MAX_DEPTH {
        return Err(LoadError::Syntax {
            line: lexer.line(),
            message: format!("lists nested deeper than {MAX_DEPTH} levels"),
        });
    }
    let mut pairs = Vec::new();
    loop {
        let Some(Token { kind, line }) = lexer.next_token()? else {
            return match opened_at {
                Some(open) => Err(LoadError::Syntax {
                    line: lexer.line(),
                    message: format!("'[' opened on line {open} is never closed"),
                }),
                None => Ok(pairs),
            };
        };

        let key = match kind {
            TokenKind::Key(key) => key,
            TokenKind::Close => {
                return match opened_at {
                    Some(_) => Ok(pairs),
                    None => Err(LoadError::Syntax {
                        line,
                        message: "']' without a matching '['".to_string(),
                    }),
                };
            }
            other => {
                return Err(LoadError::Syntax {
                    line,
                    message: format!("expected a key, found {}", describe(&other)),
                });
            }
        };

        let value = parse_value(lexer, &key, line, depth)?;
        pairs.push(GmlPair { key, value, line });
    }
}

fn parse_value(
    lexer: &mut Lexer<'_>,
    key: &str,
    key_line: usize,
    depth: usize,
) -> Result<GmlValue, LoadError> {
    let Some(Token { kind, line }) = lexer.next_token()? else {
        return Err(LoadError::PrematureEof {
            line: lexer.line(),
            message: format!("key `{key}` on line {key_line} has no value"),
        });
    };

    match kind {
        TokenKind::Int(v) => Ok(GmlValue::Int(v)),
        TokenKind::Real(v) => Ok(GmlValue::Real(v)),
        TokenKind::Str(v) => Ok(GmlValue::Str(v)),
        TokenKind::Open => parse_list(lexer, Some(line), depth + 1).map(GmlValue::List),
        other => Err(LoadError::Syntax {
            line,
            message: format!("key `{key}` expects a value, found {}", describe(&other)),
        }),
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Key(k) => format!("key `{k}`"),
        TokenKind::Int(v) => format!("integer {v}"),
        TokenKind::Real(v) => format!("real {v}"),
        TokenKind::Str(s) => format!("string {s:?}"),
        TokenKind::Open => "'['".to_string(),
        TokenKind::Close => "']'".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_lists_parse() {
        let doc = parse_document("graph [ node [ id 1 ] directed 1 ]").expect("parses");
        assert_eq!(doc.len(), 1);
        let GmlValue::List(inner) = &doc[0].value else {
            panic!("graph should be a list");
        };
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[1].key, "directed");
        assert_eq!(inner[1].value, GmlValue::Int(1));
    }

    #[test]
    fn stray_close_bracket_is_syntax_error() {
        let err = parse_document("graph [ ] ]").expect_err("must fail");
        assert!(matches!(err, LoadError::Syntax { .. }), "{err}");
    }

    #[test]
    fn unclosed_bracket_is_syntax_error() {
        let err = parse_document("graph [\n node [ id 1 ]\n").expect_err("must fail");
        match err {
            LoadError::Syntax { message, .. } => assert!(message.contains("line 1"), "{message}"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn value_in_key_position_is_syntax_error() {
        let err = parse_document("graph [ 5 ]").expect_err("must fail");
        assert!(matches!(err, LoadError::Syntax { line: 1, .. }));
    }

    #[test]
    fn key_followed_by_key_is_syntax_error() {
        let err = parse_document("id label").expect_err("must fail");
        assert!(matches!(err, LoadError::Syntax { .. }));
    }

    #[test]
    fn key_at_eof_is_premature_eof() {
        let err = parse_document("graph [ id ").expect_err("must fail");
        assert!(matches!(err, LoadError::PrematureEof { .. }));
    }

    #[test]
    fn runaway_nesting_is_rejected() {
        let src = "a [ ".repeat(MAX_DEPTH + 2);
        let err = parse_document(&src).expect_err("must fail");
        assert!(matches!(err, LoadError::Syntax { .. }));
    }

    #[test]
    fn empty_document_is_empty() {
        assert!(parse_document("  # nothing\n").expect("parses").is_empty());
    }
}
