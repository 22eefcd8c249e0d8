//! Token data model and the lexer.
//!
//! The lexer is a single forward pass with no backtracking. All whitespace is
//! interchangeable separator material; the structural characters `( ) [ ]`
//! are tokens of their own; digit runs become number literals; `"` opens a
//! string literal; any other run up to a separator is a symbol.

use crate::strings;
use crate::types::Int;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Symbol,
    Number(Int),
    /// Unescaped payload; the raw source text (quotes included) stays in
    /// [`Token::text`].
    Str(String),
    Open,
    Close,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// 1-based source position of the token's first character.
    pub line: usize,
    pub column: usize,
}

// Token equality compares text regardless of variant.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Debug, PartialEq)]
pub enum LexError {
    MalformedAtom { line: usize, column: usize },
    UnterminatedString { line: usize, column: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::MalformedAtom { line, column } => {
                write!(f, "malformed atom at {}:{}", line, column)
            }
            LexError::UnterminatedString { line, column } => {
                write!(f, "unterminated string starting at {}:{}", line, column)
            }
        }
    }
}

fn is_structural(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']')
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || is_structural(c)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn lex(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
                continue;
            }
            let (line, column) = (self.line, self.column);
            let token = if is_structural(c) {
                self.bump();
                Token {
                    text: c.to_string(),
                    kind: if c == '(' || c == '[' {
                        TokenKind::Open
                    } else {
                        TokenKind::Close
                    },
                    line,
                    column,
                }
            } else if c.is_ascii_digit() {
                self.next_number(line, column)?
            } else if c == '"' {
                self.next_string(line, column)?
            } else {
                self.next_symbol(line, column)
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_number(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_separator(c) {
                break;
            }
            if !c.is_ascii_digit() {
                return Err(LexError::MalformedAtom { line, column });
            }
            text.push(c);
            self.bump();
        }
        let value: Int = text
            .parse()
            .map_err(|_| LexError::MalformedAtom { line, column })?;
        Ok(Token {
            text,
            kind: TokenKind::Number(value),
            line,
            column,
        })
    }

    fn next_string(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        self.bump(); // opening quote
        let mut raw = String::new();
        // A quote closes the literal only when preceded by an even number of
        // consecutive backslashes.
        let mut backslashes = 0usize;
        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedString { line, column }),
                Some('"') if backslashes % 2 == 0 => {
                    self.bump();
                    break;
                }
                Some(c) => {
                    backslashes = if c == '\\' { backslashes + 1 } else { 0 };
                    raw.push(c);
                    self.bump();
                }
            }
        }
        Ok(Token {
            text: format!("\"{}\"", raw),
            kind: TokenKind::Str(strings::unescape(&raw)),
            line,
            column,
        })
    }

    fn next_symbol(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_separator(c) {
                break;
            }
            text.push(c);
            self.bump();
        }
        Token {
            text,
            kind: TokenKind::Symbol,
            line,
            column,
        }
    }
}

pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).lex()
}
