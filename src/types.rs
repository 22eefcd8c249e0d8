//! The closed set of runtime values.
//!
//! Forms and values share one enum: the reader emits `Token` leaves and
//! `List` compound nodes, and evaluation maps those onto the remaining
//! variants. The evaluator only ever distinguishes this fixed set, so the
//! callable kinds (`Function`, `Macro`, `Primitive`, `Special`) are tagged
//! variants rather than an open trait.

use crate::environment::Environment;
use crate::evaluator;
use crate::list::List;
use crate::printer::{self, PrintMode};
use crate::tokens::{Token, TokenKind};
use itertools::Itertools;
use std::fmt;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

pub type Int = i64;

#[derive(Debug, Clone)]
pub enum Value {
    /// The canonical empty value: the result of an empty `do`, an untaken
    /// `if` with no else-arm, and `print`. Compares equal to the empty list.
    Nil,
    Bool(bool),
    Int(Int),
    Str(String),
    /// An unevaluated leaf form: a symbol or literal as read from source.
    Token(Token),
    List(List<Value>),
    Function(Rc<Closure>),
    Macro(Rc<Closure>),
    Primitive(&'static PrimitiveFn),
    Special(&'static SpecialForm),
}

/// A function value paired with the environment captured at its definition
/// site. `Macro` values share this shape; the distinct `Value` tag is what
/// changes how the evaluator treats their arguments.
#[derive(Clone)]
pub struct Closure {
    pub parameters: Vec<Token>,
    pub body: Value,
    pub parent: Rc<Environment>,
}

impl Closure {
    pub(crate) fn arity(&self) -> Arity {
        Arity::exactly(self.parameters.len())
    }
}

// Not derived: the captured parent environment may well contain this closure.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: ({}), body: {:?}}}",
            self.parameters.iter().join(" "),
            self.body
        )
    }
}

/// A builtin receiving already-evaluated arguments.
pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<builtin {}>", self.name)
    }
}

/// A builtin receiving its argument forms unevaluated, together with the
/// calling environment. Implementations drive evaluation order themselves by
/// calling back into the evaluator.
pub struct SpecialForm {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value], &Rc<Environment>) -> evaluator::Result,
}

impl fmt::Debug for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<special form {}>", self.name)
    }
}

/// Everything except the designated false value is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Bool(false))
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
    Even,
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
            Self::Even => n % 2 == 0,
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), ArityError> {
        if self.contains(n) {
            Ok(())
        } else {
            Err(ArityError {
                name,
                expected: self.clone(),
                got: n,
            })
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) if r.start() == r.end() => write!(f, "exactly {}", r.start()),
            Arity::Between(r) => write!(f, "between {} and {}", r.start(), r.end()),
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
            Arity::Even => write!(f, "an even number of"),
        }
    }
}

#[derive(Debug)]
pub struct ArityError {
    pub name: &'static str,
    pub expected: Arity,
    pub got: usize,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expected {} arguments, but received {}",
            self.name, self.expected, self.got
        )
    }
}

/// A non-symbol appeared where a bind name is required.
#[derive(Debug)]
pub struct BindTargetError {
    pub context: &'static str,
    pub found: String,
}

impl fmt::Display for BindTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: bind target must be a symbol, got {}",
            self.context, self.found
        )
    }
}

#[derive(Debug, PartialEq)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotAMacro,
    NotCallable,
}

impl Value {
    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&List<Value>, TypeMismatch> {
        match self {
            Value::List(list) => Ok(list),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Option<&Token> {
        match self {
            Value::Token(token) if matches!(token.kind, TokenKind::Symbol) => Some(token),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Nil, List(l)) | (List(l), Nil) => l.is_empty(),
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Token(a), Token(b)) => a == b,
            (List(a), List(b)) => a == b,
            // No custom equality for callables; fall back to identity.
            (Function(a), Function(b)) | (Macro(a), Macro(b)) => Rc::ptr_eq(a, b),
            (Primitive(a), Primitive(b)) => std::ptr::eq(*a, *b),
            (Special(a), Special(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

// Lets tests compare quoted forms against plain token text.
impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Value::Token(token) => token.text == *other,
            Value::Str(s) => s == other,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::pr_str(self, PrintMode::Readable))
    }
}
