//! Recursive-descent parser over the lexer's token sequence.

use crate::list::List;
use crate::tokens::{lex, LexError, Token, TokenKind};
use crate::types::Value;
use std::fmt;
use std::iter::Peekable;
use std::vec;

type Tokens = Peekable<vec::IntoIter<Token>>;

#[derive(Debug, PartialEq)]
pub enum Error {
    Lex(LexError),
    /// Input ended before any form was read.
    NoInput,
    UnclosedForm { line: usize, column: usize },
    UnexpectedClose { line: usize, column: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "{}", e),
            Error::NoInput => write!(f, "no form to read"),
            Error::UnclosedForm { line, column } => {
                write!(f, "unclosed form opened at {}:{}", line, column)
            }
            Error::UnexpectedClose { line, column } => {
                write!(f, "unexpected closing delimiter at {}:{}", line, column)
            }
        }
    }
}

/// Reads the first complete top-level form; trailing tokens are ignored.
/// Callers wanting several top-level forms wrap them in an explicit `do`.
pub fn read_str(input: &str) -> Result<Value, Error> {
    let tokens = lex(input).map_err(Error::Lex)?;
    let mut tokens = tokens.into_iter().peekable();
    read_form(&mut tokens)
}

fn read_form(tokens: &mut Tokens) -> Result<Value, Error> {
    match tokens.next() {
        None => Err(Error::NoInput),
        Some(token) => match token.kind {
            TokenKind::Open => read_compound(tokens, &token),
            TokenKind::Close => Err(Error::UnexpectedClose {
                line: token.line,
                column: token.column,
            }),
            _ => Ok(Value::Token(token)),
        },
    }
}

fn read_compound(tokens: &mut Tokens, open: &Token) -> Result<Value, Error> {
    // Children are consed on as they arrive, which leaves them in reverse
    // arrival order; the reverse on the way out restores source order.
    let mut children = List::new();
    loop {
        match tokens.next() {
            None => {
                return Err(Error::UnclosedForm {
                    line: open.line,
                    column: open.column,
                })
            }
            Some(token) => match token.kind {
                TokenKind::Close => return Ok(Value::List(children.reverse())),
                TokenKind::Open => children = children.cons(read_compound(tokens, &token)?),
                _ => children = children.cons(Value::Token(token)),
            },
        }
    }
}
