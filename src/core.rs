//! The primitive library: builtins that receive evaluated arguments.

use crate::evaluator;
use crate::printer::{self, PrintMode};
use crate::types::{Arity, Int, PrimitiveFn, Value};
use std::collections::HashMap;

fn grab_ints(args: &[Value]) -> evaluator::Result<Vec<Int>> {
    args.iter()
        .map(|arg| arg.as_int())
        .collect::<Result<Vec<_>, _>>()
        .map_err(evaluator::Error::TypeMismatch)
}

static SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    arity: Arity::at_least(0),
    fn_ptr: sum_,
};

// Left fold with identity 0, so `(+)` is 0 and `(+ 42)` is 42.
fn sum_(args: &[Value]) -> evaluator::Result {
    let value = grab_ints(args)?
        .iter()
        .fold(0 as Int, |acc, &x| acc.wrapping_add(x));
    Ok(Value::Int(value))
}

static GT: PrimitiveFn = PrimitiveFn {
    name: ">",
    arity: Arity::at_least(0),
    fn_ptr: gt_,
};

// Strictly-decreasing chain test over consecutive pairs, left to right.
fn gt_(args: &[Value]) -> evaluator::Result {
    let ints = grab_ints(args)?;
    Ok(Value::Bool(ints.windows(2).all(|pair| pair[0] > pair[1])))
}

static PRINT: PrimitiveFn = PrimitiveFn {
    name: "print",
    arity: Arity::at_least(0),
    fn_ptr: print_,
};

fn print_(args: &[Value]) -> evaluator::Result {
    let text: String = args
        .iter()
        .map(|arg| printer::pr_str(arg, PrintMode::Direct))
        .collect();
    println!("{}", text);
    Ok(Value::Nil)
}

lazy_static! {
    pub static ref CORE: HashMap<&'static str, &'static PrimitiveFn> = {
        let mut map = HashMap::new();
        for func in &[&SUM, &GT, &PRINT] {
            map.insert(func.name, *func);
        }
        map
    };
}
