//! The program entry: parse a source string, then evaluate the first
//! top-level form it contains.

use crate::environment::Environment;
use crate::types::Value;
use crate::{evaluator, reader};
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<Value, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

/// Composes read and evaluate. With no environment given, evaluation runs
/// against a fresh child of the base environment, which is then discarded.
pub fn read_eval(source: &str, env: Option<&Rc<Environment>>) -> Result {
    let form = reader::read_str(source).map_err(Error::Read)?;
    let fresh;
    let env = match env {
        Some(env) => env,
        None => {
            fresh = Environment::spawn_from(&Environment::base());
            &fresh
        }
    };
    evaluator::evaluate(&form, env).map_err(Error::Eval)
}
