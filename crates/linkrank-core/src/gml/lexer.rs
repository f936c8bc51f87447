//! Tokenizer for GML source text.
//!
//! Tokens are separated by whitespace. `#` starts a comment that runs to the
//! end of the line. Strings are double-quoted and may span lines; GML has no
//! escape sequences, so entities such as `&quot;` are passed through as-is.

use crate::error::LoadError;

/// Maximum length of a numeric literal, sign and exponent included.
pub const MAX_DIGITS: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Key(String),
    Int(i64),
    Real(f64),
    Str(String),
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line the token starts on.
    pub line: usize,
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            line: 1,
        }
    }

    /// Current 1-based line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Produce the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Unexpected`] for a character that cannot start a
    /// token, [`LoadError::PrematureEof`] for an unterminated string, and
    /// [`LoadError::TooManyDigits`] for an oversized number.
    pub fn next_token(&mut self) -> Result<Option<Token>, LoadError> {
        self.skip_trivia();
        let line = self.line;
        let Some(&c) = self.chars.peek() else {
            return Ok(None);
        };

        let kind = match c {
            '[' => {
                self.chars.next();
                TokenKind::Open
            }
            ']' => {
                self.chars.next();
                TokenKind::Close
            }
            '"' => {
                self.chars.next();
                TokenKind::Str(self.string(line)?)
            }
            c if c.is_ascii_alphabetic() || c == '_' => TokenKind::Key(self.key()),
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.number(line)?,
            found => return Err(LoadError::Unexpected { line, found }),
        };

        Ok(Some(Token { kind, line }))
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '#' {
                while let Some(c) = self.chars.next() {
                    if c == '\n' {
                        self.line += 1;
                        break;
                    }
                }
            } else if c.is_whitespace() {
                if c == '\n' {
                    self.line += 1;
                }
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn key(&mut self) -> String {
        let mut key = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                key.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        key
    }

    fn string(&mut self, start: usize) -> Result<String, LoadError> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(out),
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    out.push(c);
                }
                None => {
                    return Err(LoadError::PrematureEof {
                        line: self.line,
                        message: format!("string opened on line {start} is never closed"),
                    });
                }
            }
        }
    }

    fn number(&mut self, line: usize) -> Result<TokenKind, LoadError> {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            let continues = c.is_ascii_digit()
                || c == '.'
                || matches!(c, 'e' | 'E')
                || (matches!(c, '+' | '-')
                    && (text.is_empty() || text.ends_with(['e', 'E'])));
            if !continues {
                break;
            }
            if text.len() == MAX_DIGITS {
                return Err(LoadError::TooManyDigits {
                    line,
                    limit: MAX_DIGITS,
                });
            }
            text.push(c);
            self.chars.next();
        }

        let is_real = text.contains(['.', 'e', 'E']);
        let parsed = if is_real {
            text.parse::<f64>().ok().map(TokenKind::Real)
        } else {
            text.parse::<i64>().ok().map(TokenKind::Int)
        };

        parsed.ok_or_else(|| LoadError::Syntax {
            line,
            message: format!("malformed number {text:?}"),
        })
    }
}
