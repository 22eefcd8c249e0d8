//! Form evaluation: literal/symbol/compound dispatch, macro expansion and
//! function application.
//!
//! Evaluation is plain synchronous recursion. Depth is bounded only by the
//! host call stack; blowing it is fatal and deliberately not caught here.

use crate::environment::{Environment, SymbolNotFound};
use crate::list::{IndexOutOfBounds, List};
use crate::tokens::TokenKind;
use crate::types::{ArityError, BindTargetError, Closure, PrimitiveFn, TypeMismatch, Value};
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    SymbolNotFound(SymbolNotFound),
    TypeMismatch(TypeMismatch),
    Arity(ArityError),
    BindTarget(BindTargetError),
    Index(IndexOutOfBounds),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SymbolNotFound(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {:?}", e),
            Error::Arity(e) => write!(f, "{}", e),
            Error::BindTarget(e) => write!(f, "{}", e),
            Error::Index(e) => write!(f, "{}", e),
        }
    }
}

impl From<SymbolNotFound> for Error {
    fn from(e: SymbolNotFound) -> Self {
        Self::SymbolNotFound(e)
    }
}

impl From<TypeMismatch> for Error {
    fn from(e: TypeMismatch) -> Self {
        Self::TypeMismatch(e)
    }
}

impl From<ArityError> for Error {
    fn from(e: ArityError) -> Self {
        Self::Arity(e)
    }
}

impl From<BindTargetError> for Error {
    fn from(e: BindTargetError) -> Self {
        Self::BindTarget(e)
    }
}

impl From<IndexOutOfBounds> for Error {
    fn from(e: IndexOutOfBounds) -> Self {
        Self::Index(e)
    }
}

pub fn evaluate(form: &Value, env: &Rc<Environment>) -> Result {
    log::trace!("evaluate {}", form);
    match form {
        Value::Token(token) => match &token.kind {
            TokenKind::Number(n) => Ok(Value::Int(*n)),
            TokenKind::Str(s) => Ok(Value::Str(s.clone())),
            // Structural tokens never leave the reader; anything else here
            // is a name to resolve.
            _ => Ok(env.lookup(&token.text)?),
        },
        Value::List(forms) => evaluate_compound(forms, env),
        value => Ok(value.clone()),
    }
}

fn evaluate_compound(forms: &List<Value>, env: &Rc<Environment>) -> Result {
    let head = match forms.car() {
        None => return Ok(Value::Nil),
        Some(head) => head,
    };
    // The head goes first: only its value tells us whether the remaining
    // forms are evaluated at all.
    let target = evaluate(head, env)?;
    let rest: Vec<Value> = forms.cdr().iter().cloned().collect();
    match target {
        Value::Special(form) => {
            form.arity.validate_for(rest.len(), form.name)?;
            log::trace!("special form {}", form.name);
            (form.fn_ptr)(&rest, env)
        }
        Value::Macro(closure) => {
            let expanded = expand_macro(&closure, &rest)?;
            log::trace!("macro {} expanded to {}", head, expanded);
            // The rewritten form runs in the original calling environment.
            evaluate(&expanded, env)
        }
        callable => {
            let args = evaluate_sequence(&rest, env)?;
            apply(&callable, &args)
        }
    }
}

/// Applies a callable to already-evaluated arguments.
pub fn apply(callable: &Value, args: &[Value]) -> Result {
    match callable {
        Value::Primitive(func) => call_primitive(func, args),
        Value::Function(closure) => {
            let env = closure_env(closure, args)?;
            evaluate(&closure.body, &env)
        }
        _ => Err(Error::TypeMismatch(TypeMismatch::NotCallable)),
    }
}

pub(crate) fn call_primitive(func: &'static PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("call {} with {} arguments", func.name, args.len());
    (func.fn_ptr)(args)
}

/// One frame on top of the closure's *definition-time* environment, with
/// parameters bound to the caller's evaluated arguments. Using the captured
/// parent rather than the call site is what makes this a lexical closure.
fn closure_env(closure: &Closure, args: &[Value]) -> Result<Rc<Environment>> {
    closure.arity().validate_for(args.len(), "function")?;
    let env = Environment::spawn_from(&closure.parent);
    for (parameter, value) in closure.parameters.iter().zip(args) {
        env.bind(parameter.text.clone(), value.clone());
    }
    Ok(env)
}

/// One macro rewrite step: the body runs with parameters bound to the raw,
/// unevaluated argument forms, and the resulting form is returned as-is.
pub(crate) fn expand_macro(closure: &Closure, forms: &[Value]) -> Result {
    closure.arity().validate_for(forms.len(), "macro")?;
    let env = Environment::spawn_from(&closure.parent);
    for (parameter, form) in closure.parameters.iter().zip(forms) {
        env.bind(parameter.text.clone(), form.clone());
    }
    evaluate(&closure.body, &env)
}

/// Evaluates forms left to right, stopping at the first error.
pub fn evaluate_sequence(forms: &[Value], env: &Rc<Environment>) -> Result<Vec<Value>> {
    forms.iter().map(|form| evaluate(form, env)).collect()
}
