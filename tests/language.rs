//! End-to-end tests driving source text through `read_eval`.

use lilt::environment::Environment;
use lilt::evaluator;
use lilt::interpreter::{read_eval, Error};
use lilt::Value;
use std::rc::Rc;

fn eval(source: &str) -> Value {
    read_eval(source, None)
        .unwrap_or_else(|e| panic!("{} failed to evaluate: {}", source, e))
}

fn eval_err(source: &str) -> evaluator::Error {
    match read_eval(source, None) {
        Ok(value) => panic!("{} unexpectedly evaluated to {}", source, value),
        Err(Error::Eval(e)) => e,
        Err(Error::Read(e)) => panic!("{} failed in the reader: {}", source, e),
    }
}

fn session() -> Rc<Environment> {
    Environment::spawn_from(&Environment::base())
}

#[test]
fn addition_is_variadic_and_nests() {
    assert_eq!(eval("(+ 40 2)"), Value::Int(42));
    assert_eq!(eval("(+ 12 20 1 1)"), Value::Int(34));
    assert_eq!(eval("(+ (+ 2 2) (+ 2 (+ 1 1)))"), Value::Int(8));
    assert_eq!(eval("(+)"), Value::Int(0));
}

#[test]
fn greater_than_chains() {
    assert_eq!(eval("(> 2 1)"), Value::Bool(true));
    assert_eq!(eval("(> 1 2)"), Value::Bool(false));
    assert_eq!(eval("(> 2 2)"), Value::Bool(false));
    assert_eq!(eval("(> 5 4 3 2)"), Value::Bool(true));
    assert_eq!(eval("(> 5 4 5 2)"), Value::Bool(false));
}

#[test]
fn greater_than_rejects_non_numbers() {
    assert!(matches!(
        eval_err("(> 1 +)"),
        evaluator::Error::TypeMismatch(_)
    ));
}

#[test]
fn let_binds_values_to_names() {
    assert_eq!(eval("(let (k 40) (+ k 2))"), Value::Int(42));
    assert_eq!(eval("(let (k 3 i 4) (+ k i))"), Value::Int(7));
    assert_eq!(eval("(let (k (+ 2 2)) (+ k 1))"), Value::Int(5));
}

#[test]
fn let_bindings_are_sequential() {
    assert_eq!(eval("(let (k 3 i (+ k 2)) (+ k i))"), Value::Int(8));
}

#[test]
fn let_nests_and_shadows() {
    assert_eq!(eval("(let (k 3) (let (i 7) (+ k i)))"), Value::Int(10));
    assert_eq!(eval("(let (k 2) (let (k 42) k))"), Value::Int(42));
    assert_eq!(eval("(let (k 42) (let (k 41) k) k)"), Value::Int(42));
}

#[test]
fn let_has_an_implicit_do() {
    assert_eq!(eval("(let (k 2) (+ 3 3) (+ k k))"), Value::Int(4));
}

#[test]
fn let_rejects_non_symbol_targets() {
    assert!(matches!(
        eval_err("(let (21 42) (+ 21 1))"),
        evaluator::Error::BindTarget(_)
    ));
}

#[test]
fn let_rejects_odd_binding_groups() {
    assert!(matches!(
        eval_err("(let (k) k)"),
        evaluator::Error::Arity(_)
    ));
}

#[test]
fn if_takes_two_or_three_arms() {
    assert_eq!(eval("(if (> 1 2) 21)"), Value::Nil);
    assert_eq!(eval("(if (> 2 1) 21)"), Value::Int(21));
    assert_eq!(eval("(if (> 1 2) 21 42)"), Value::Int(42));
    assert_eq!(eval("(if (> 2 1) 21 42)"), Value::Int(21));
}

#[test]
fn if_never_evaluates_the_untaken_arm() {
    assert_eq!(eval("(if (> 1 2) undefined-symbol 42)"), Value::Int(42));
    assert_eq!(eval("(if (> 2 1) 21 undefined-symbol)"), Value::Int(21));
}

#[test]
fn only_false_is_falsy() {
    assert_eq!(eval("(if 0 1 2)"), Value::Int(1));
    assert_eq!(eval("(if (quote ()) 1 2)"), Value::Int(1));
}

#[test]
fn lambdas_are_anonymous_functions() {
    assert_eq!(
        eval("(let (f (λ (a b c) (+ a (+ b c)))) (+ (f 1 2 3) (f 0 1 1)))"),
        Value::Int(8)
    );
    assert_eq!(eval("(let (f (lambda (x) (+ x 1))) (f 41))"), Value::Int(42));
}

#[test]
fn lambdas_close_over_their_definition_environment() {
    assert_eq!(eval("((let (x 42) (let (f (λ () x)) f)))"), Value::Int(42));
}

#[test]
fn function_application_requires_exact_arity() {
    assert!(matches!(
        eval_err("(let (f (λ (a) a)) (f 1 2))"),
        evaluator::Error::Arity(_)
    ));
    assert!(matches!(
        eval_err("(let (f (λ (a b) a)) (f 1))"),
        evaluator::Error::Arity(_)
    ));
}

#[test]
fn def_binds_in_the_global_frame() {
    assert_eq!(eval("(do (def x 40) (+ x 2))"), Value::Int(42));
    assert_eq!(eval("(do (def x 40) (def x 5) (+ x 2))"), Value::Int(7));
    assert_eq!(eval("(do (let (x 42) (def x 29)) x)"), Value::Int(29));
}

#[test]
fn def_is_trumped_by_lexical_shadowing() {
    let env = session();
    assert_eq!(
        read_eval("(do (def x 42) (let (x 21) x))", Some(&env)).unwrap(),
        Value::Int(21)
    );
    // outside the let the global is untouched
    assert_eq!(read_eval("x", Some(&env)).unwrap(), Value::Int(42));
}

#[test]
fn definitions_persist_across_reads_in_one_session() {
    let env = session();
    read_eval("(def inc (λ (n) (+ n 1)))", Some(&env)).unwrap();
    assert_eq!(read_eval("(inc 41)", Some(&env)).unwrap(), Value::Int(42));
}

#[test]
fn quote_suppresses_evaluation() {
    assert_eq!(eval("(quote 42)"), "42");
    match eval("(quote (1 2 3))") {
        Value::List(items) => {
            assert_eq!(items.len(), 3);
            assert_eq!(items, vec!["1", "2", "3"]);
        }
        other => panic!("expected a list, got {:?}", other),
    }
}

#[test]
fn list_evaluates_its_arguments() {
    match eval("(list 1 (+ 1 1) 3)") {
        Value::List(items) => {
            assert_eq!(items, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        }
        other => panic!("expected a list, got {:?}", other),
    }
    assert_eq!(eval("(list)"), Value::List(lilt::list::List::new()));
}

#[test]
fn do_evaluates_in_order_and_returns_the_last_form() {
    assert_eq!(eval("(do 1 2 3)"), Value::Int(3));
    assert_eq!(eval("(do)"), Value::Nil);
}

#[test]
fn macros_rewrite_before_evaluating() {
    let env = session();
    read_eval(
        "(def unless (macro (test then else) (list (quote if) test else then)))",
        Some(&env),
    )
    .unwrap();
    assert_eq!(
        read_eval("(unless (> 1 2) 42 21)", Some(&env)).unwrap(),
        Value::Int(42)
    );
    assert_eq!(
        read_eval("(unless (> 2 1) 42 21)", Some(&env)).unwrap(),
        Value::Int(21)
    );
}

#[test]
fn macro_arguments_are_not_evaluated_before_expansion() {
    let env = session();
    // The macro discards its argument, so an unbound symbol must not raise.
    read_eval("(def ignore (macro (form) 42))", Some(&env)).unwrap();
    assert_eq!(
        read_eval("(ignore undefined-symbol)", Some(&env)).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn macroexpand_returns_the_rewritten_form_unevaluated() {
    let env = session();
    read_eval(
        "(def unless (macro (test then else) (list (quote if) test else then)))",
        Some(&env),
    )
    .unwrap();
    let expanded = read_eval(
        "(macroexpand (quote (unless (> 1 2) 42 21)))",
        Some(&env),
    )
    .unwrap();
    match expanded {
        Value::List(forms) => {
            assert_eq!(forms.len(), 4);
            assert_eq!(*forms.nth(0).unwrap(), "if");
            assert_eq!(*forms.nth(2).unwrap(), "21");
            assert_eq!(*forms.nth(3).unwrap(), "42");
        }
        other => panic!("expected the rewritten form, got {:?}", other),
    }
}

#[test]
fn string_literals_evaluate_to_strings() {
    assert_eq!(eval(r#""the quick brown fox""#), Value::Str("the quick brown fox".into()));
    assert_eq!(eval(r#"(let (s "a\nb") s)"#), Value::Str("a\nb".into()));
}

#[test]
fn print_returns_the_empty_value() {
    assert_eq!(eval(r#"(print "out: " (+ 40 2))"#), Value::Nil);
}

#[test]
fn unknown_symbols_are_reported() {
    assert!(matches!(
        eval_err("(not-an-operator 42)"),
        evaluator::Error::SymbolNotFound(_)
    ));
}

#[test]
fn applying_a_non_callable_is_a_type_mismatch() {
    assert!(matches!(
        eval_err("(42 1)"),
        evaluator::Error::TypeMismatch(_)
    ));
}

#[test]
fn special_form_arities_are_checked() {
    assert!(matches!(eval_err("(quote 1 2)"), evaluator::Error::Arity(_)));
    assert!(matches!(eval_err("(if 1)"), evaluator::Error::Arity(_)));
    assert!(matches!(
        eval_err("(def x)"),
        evaluator::Error::Arity(_)
    ));
}

#[test]
fn square_brackets_delimit_forms_too() {
    assert_eq!(eval("[+ 1 2]"), Value::Int(3));
}
