//! The fixed special-form vocabulary.
//!
//! Each entry is a tagged callable bound to a reserved name in the base
//! environment. The evaluator hands them their argument forms unevaluated
//! together with the calling environment; they drive evaluation order
//! themselves through the `evaluator` module.

use crate::environment::Environment;
use crate::evaluator::{self, evaluate, Error, Result};
use crate::types::{
    truthy, Arity, BindTargetError, Closure, SpecialForm, TypeMismatch, Value,
};
use itertools::Itertools;
use std::collections::HashMap;
use std::rc::Rc;

pub static DO: SpecialForm = SpecialForm {
    name: "do",
    arity: Arity::at_least(0),
    fn_ptr: do_,
};

/// Evaluates each form in order; the last result wins, an empty `do` is nil.
fn do_(forms: &[Value], env: &Rc<Environment>) -> Result {
    let mut result = Value::Nil;
    for form in forms {
        result = evaluate(form, env)?;
    }
    Ok(result)
}

pub static LET: SpecialForm = SpecialForm {
    name: "let",
    arity: Arity::at_least(1),
    fn_ptr: let_,
};

fn let_(forms: &[Value], env: &Rc<Environment>) -> Result {
    let bindings = forms[0].as_list()?;
    Arity::Even.validate_for(bindings.len(), "let bindings")?;
    // One new scope, filled pair by pair: each right-hand side is evaluated
    // in the partially extended scope so later bindings see earlier ones.
    let child = Environment::spawn_from(env);
    for (target, expr) in bindings.iter().tuples() {
        let name = bind_name(target, "let")?;
        let value = evaluate(expr, &child)?;
        child.bind(name, value);
    }
    do_(&forms[1..], &child)
}

pub static IF: SpecialForm = SpecialForm {
    name: "if",
    arity: Arity::Between(2..=3),
    fn_ptr: if_,
};

fn if_(forms: &[Value], env: &Rc<Environment>) -> Result {
    let test = evaluate(&forms[0], env)?;
    if truthy(&test) {
        evaluate(&forms[1], env)
    } else if let Some(alternative) = forms.get(2) {
        evaluate(alternative, env)
    } else {
        Ok(Value::Nil)
    }
}

pub static LAMBDA: SpecialForm = SpecialForm {
    name: "lambda",
    arity: Arity::exactly(2),
    fn_ptr: lambda_,
};

fn lambda_(forms: &[Value], env: &Rc<Environment>) -> Result {
    make_closure(forms, env, "lambda").map(|closure| Value::Function(Rc::new(closure)))
}

pub static MACRO: SpecialForm = SpecialForm {
    name: "macro",
    arity: Arity::exactly(2),
    fn_ptr: macro_,
};

fn macro_(forms: &[Value], env: &Rc<Environment>) -> Result {
    make_closure(forms, env, "macro").map(|closure| Value::Macro(Rc::new(closure)))
}

fn make_closure(
    forms: &[Value],
    env: &Rc<Environment>,
    context: &'static str,
) -> std::result::Result<Closure, Error> {
    let parameters = forms[0]
        .as_list()?
        .iter()
        .map(|form| {
            form.as_symbol().cloned().ok_or_else(|| {
                Error::BindTarget(BindTargetError {
                    context,
                    found: form.to_string(),
                })
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Closure {
        parameters,
        body: forms[1].clone(),
        parent: env.clone(),
    })
}

pub static DEF: SpecialForm = SpecialForm {
    name: "def",
    arity: Arity::exactly(2),
    fn_ptr: def_,
};

fn def_(forms: &[Value], env: &Rc<Environment>) -> Result {
    let name = bind_name(&forms[0], "def")?;
    // The expression sees the current scope, but the binding always lands in
    // the root frame: def is global no matter how deeply it is nested.
    let value = evaluate(&forms[1], env)?;
    env.root().bind(name.clone(), value.clone());
    log::debug!("define {} as {}", name, value);
    Ok(value)
}

pub static QUOTE: SpecialForm = SpecialForm {
    name: "quote",
    arity: Arity::exactly(1),
    fn_ptr: quote_,
};

fn quote_(forms: &[Value], _env: &Rc<Environment>) -> Result {
    Ok(forms[0].clone())
}

pub static LIST: SpecialForm = SpecialForm {
    name: "list",
    arity: Arity::at_least(0),
    fn_ptr: list_,
};

fn list_(forms: &[Value], env: &Rc<Environment>) -> Result {
    evaluator::evaluate_sequence(forms, env)
        .map(|values| Value::List(values.into_iter().collect()))
}

pub static MACROEXPAND: SpecialForm = SpecialForm {
    name: "macroexpand",
    arity: Arity::exactly(1),
    fn_ptr: macroexpand_,
};

/// One expansion step; the rewritten form is returned without evaluating it.
fn macroexpand_(forms: &[Value], env: &Rc<Environment>) -> Result {
    let form = evaluate(&forms[0], env)?;
    let call = form.as_list()?;
    let head = call
        .car()
        .ok_or(Error::TypeMismatch(TypeMismatch::NotAMacro))?;
    match evaluate(head, env)? {
        Value::Macro(closure) => {
            let rest: Vec<Value> = call.cdr().iter().cloned().collect();
            evaluator::expand_macro(&closure, &rest)
        }
        _ => Err(Error::TypeMismatch(TypeMismatch::NotAMacro)),
    }
}

fn bind_name(form: &Value, context: &'static str) -> std::result::Result<String, Error> {
    form.as_symbol()
        .map(|token| token.text.clone())
        .ok_or_else(|| {
            Error::BindTarget(BindTargetError {
                context,
                found: form.to_string(),
            })
        })
}

lazy_static! {
    pub static ref SPECIAL_FORMS: HashMap<&'static str, &'static SpecialForm> = {
        let mut map = HashMap::new();
        for form in &[
            &DO,
            &LET,
            &IF,
            &LAMBDA,
            &DEF,
            &QUOTE,
            &LIST,
            &MACRO,
            &MACROEXPAND,
        ] {
            map.insert(form.name, *form);
        }
        map
    };
}
