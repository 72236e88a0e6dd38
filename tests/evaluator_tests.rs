// End-to-end evaluation tests against one persistent session.

use pretty_assertions::assert_eq;
use tinylisp::ast::SExp;
use tinylisp::compiler::compile;
use tinylisp::parser::parse_expression;
use tinylisp::runtime::{Evaluator, Interpreter, RuntimeError, Value};
use tinylisp::Error;

fn int(n: i64) -> Value {
    Value::Sexp(SExp::Integer(n))
}

fn run(interpreter: &Interpreter, source: &str) -> Result<Value, Error> {
    let sexp = parse_expression(source)?;
    interpreter.run(&sexp)
}

fn eval_ok(interpreter: &Interpreter, source: &str) -> Value {
    run(interpreter, source).expect("expected successful evaluation")
}

#[test]
fn literals_evaluate_to_themselves() {
    let interp = Interpreter::new();
    assert_eq!(eval_ok(&interp, "5"), int(5));
    assert_eq!(
        eval_ok(&interp, "\"hi\""),
        Value::Sexp(SExp::String("hi".to_string()))
    );
    assert_eq!(eval_ok(&interp, "nil"), Value::nil());
    assert_eq!(eval_ok(&interp, "()"), Value::nil());
}

#[test]
fn compiled_nodes_are_referentially_stable() {
    // Compiling once and evaluating repeatedly, with no intervening set
    // on free variables, yields the same value each time.
    let evaluator = Evaluator::new();
    let node = compile(&parse_expression("(quote (a b c))").unwrap()).unwrap();
    let first = evaluator.evaluate(&node).unwrap();
    let second = evaluator.evaluate(&node).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), "(a b c)");
}

#[test]
fn set_binds_and_returns_the_value() {
    let interp = Interpreter::new();
    assert_eq!(eval_ok(&interp, "(set x 7)"), int(7));
    assert_eq!(eval_ok(&interp, "x"), int(7));
}

#[test]
fn set_then_add_in_the_same_environment() {
    let interp = Interpreter::new();
    eval_ok(&interp, "(set x 1)");
    assert_eq!(eval_ok(&interp, "(add x x)"), int(2));
}

#[test]
fn only_nil_selects_the_else_branch() {
    let interp = Interpreter::new();
    assert_eq!(eval_ok(&interp, "(if nil 1 2)"), int(2));
    assert_eq!(eval_ok(&interp, "(if (quote ()) 1 2)"), int(2));
    // Integer zero and the empty string are truthy.
    assert_eq!(eval_ok(&interp, "(if 0 1 2)"), int(1));
    assert_eq!(eval_ok(&interp, "(if \"\" 1 2)"), int(1));
}

#[test]
fn if_without_else_yields_nil() {
    let interp = Interpreter::new();
    assert_eq!(eval_ok(&interp, "(if nil 1)"), Value::nil());
}

#[test]
fn if_evaluates_exactly_one_branch() {
    let interp = Interpreter::new();
    // The untaken branch must not run its side effect.
    eval_ok(&interp, "(if 1 (set taken 1) (set untaken 1))");
    assert_eq!(eval_ok(&interp, "taken"), int(1));
    assert!(matches!(
        run(&interp, "untaken"),
        Err(Error::Runtime(RuntimeError::UndefinedSymbol(_)))
    ));
}

#[test]
fn quote_suppresses_evaluation() {
    let interp = Interpreter::new();
    // a, b, c are unbound; quoting must not look them up.
    let value = eval_ok(&interp, "(quote (a b c))");
    assert_eq!(value.to_string(), "(a b c)");
    assert_eq!(eval_ok(&interp, "(quote x)").to_string(), "x");
}

#[test]
fn add_is_variadic_over_integers() {
    let interp = Interpreter::new();
    assert_eq!(eval_ok(&interp, "(add)"), int(0));
    assert_eq!(eval_ok(&interp, "(add 1 2 3 -6)"), int(0));
}

#[test]
fn add_rejects_non_integers_by_position() {
    let interp = Interpreter::new();
    assert!(matches!(
        run(&interp, "(add 1 nil 3)"),
        Err(Error::Runtime(RuntimeError::TypeError { position: 1, .. }))
    ));
}

#[test]
fn add_overflow_is_an_error_not_a_crash() {
    let interp = Interpreter::new();
    assert!(matches!(
        run(&interp, "(add 9223372036854775807 1)"),
        Err(Error::Runtime(RuntimeError::IntegerOverflow { position: 1, .. }))
    ));
    // The session keeps accepting input afterwards.
    assert_eq!(eval_ok(&interp, "(add 1 2)"), int(3));
}

#[test]
fn arguments_evaluate_left_to_right_in_the_callers_environment() {
    let interp = Interpreter::new();
    // x is rebound between argument evaluations; the final lookup sees
    // the second assignment.
    assert_eq!(eval_ok(&interp, "(add (set x 1) (set x 2) x)"), int(5));
}

#[test]
fn applying_a_non_callable_is_an_error() {
    let interp = Interpreter::new();
    match run(&interp, "(1 2)") {
        Err(Error::Runtime(RuntimeError::NotCallable(rendering))) => {
            assert_eq!(rendering, "1 (integer)");
        }
        other => panic!("expected NotCallable, got {:?}", other),
    }
    match run(&interp, "((quote (a)) 2)") {
        Err(Error::Runtime(RuntimeError::NotCallable(rendering))) => {
            assert_eq!(rendering, "(a) (list)");
        }
        other => panic!("expected NotCallable, got {:?}", other),
    }
}

#[test]
fn unbound_symbol_names_itself_and_the_session_survives() {
    let interp = Interpreter::new();
    match run(&interp, "ghost") {
        Err(Error::Runtime(RuntimeError::UndefinedSymbol(sym))) => {
            assert_eq!(sym.0, "ghost");
        }
        other => panic!("expected UndefinedSymbol, got {:?}", other),
    }
    // The same session keeps accepting input.
    assert_eq!(eval_ok(&interp, "(set x 2)"), int(2));
}

#[test]
fn compile_errors_fail_before_any_evaluation() {
    let interp = Interpreter::new();
    // (if (set marker 1)) is malformed; its condition must never run.
    assert!(matches!(
        run(&interp, "(if (set marker 1))"),
        Err(Error::Compile(_))
    ));
    assert!(matches!(
        run(&interp, "marker"),
        Err(Error::Runtime(RuntimeError::UndefinedSymbol(_)))
    ));
}

#[test]
fn run_source_evaluates_in_order_and_stops_at_the_first_error() {
    let interp = Interpreter::new();
    assert_eq!(
        interp.run_source("(set x 1) (add x 1)").unwrap(),
        vec![int(1), int(2)]
    );
    // The failing middle expression halts the chunk, but side effects
    // that already ran stay in effect and the session continues.
    assert!(interp.run_source("(set y 1) ghost (set y 9)").is_err());
    assert_eq!(eval_ok(&interp, "y"), int(1));
}

#[test]
fn functions_render_as_opaque_placeholders() {
    let interp = Interpreter::new();
    assert_eq!(eval_ok(&interp, "(lambda (x) x)").to_string(), "#<lambda>");
    assert_eq!(eval_ok(&interp, "add").to_string(), "#<builtin:add>");
}

#[test]
fn hosts_register_primitives_before_the_session_starts() {
    use std::rc::Rc;
    use tinylisp::ast::Symbol;
    use tinylisp::runtime::{Arity, BuiltinFunction, Function, StandardLibrary};

    let env = StandardLibrary::create_global_environment();
    env.borrow_mut().define(
        &Symbol::new("always_seven"),
        Value::Function(Function::Builtin(BuiltinFunction {
            name: "always_seven".to_string(),
            arity: Arity::Fixed(0),
            func: Rc::new(|_| Ok(Value::Sexp(SExp::Integer(7)))),
        })),
    );
    let evaluator = Evaluator::with_env(env);
    let call = compile(&parse_expression("(always_seven)").unwrap()).unwrap();
    assert_eq!(evaluator.evaluate(&call).unwrap(), int(7));

    // Builtin arity is enforced by the evaluator before invocation.
    let bad_call = compile(&parse_expression("(always_seven 1)").unwrap()).unwrap();
    assert!(matches!(
        evaluator.evaluate(&bad_call),
        Err(RuntimeError::ArityMismatch { actual: 1, .. })
    ));
}

#[test]
fn independent_sessions_do_not_share_bindings() {
    let first = Interpreter::new();
    let second = Interpreter::new();
    eval_ok(&first, "(set x 1)");
    assert!(matches!(
        run(&second, "x"),
        Err(Error::Runtime(RuntimeError::UndefinedSymbol(_)))
    ));
}
