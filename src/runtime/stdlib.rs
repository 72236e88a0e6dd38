// Standard library: construction of the pre-populated root environment.
//
// The root environment doubles as the primitive registry. It is built
// explicitly and handed to the session rather than living as ambient
// global state, so independent sessions never share bindings.

use crate::ast::{SExp, Symbol};
use crate::runtime::environment::Environment;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::values::{Arity, BuiltinFunction, Function, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub struct StandardLibrary;

impl StandardLibrary {
    /// Create a root environment holding the constant `nil` and the
    /// host-registered primitives.
    pub fn create_global_environment() -> Rc<RefCell<Environment>> {
        let mut env = Environment::new();
        env.define(&Symbol::new("nil"), Value::nil());
        Self::register(&mut env, "add", Arity::Variadic(0), Self::add);
        Rc::new(RefCell::new(env))
    }

    fn register(
        env: &mut Environment,
        name: &str,
        arity: Arity,
        func: fn(Vec<Value>) -> RuntimeResult<Value>,
    ) {
        env.define(
            &Symbol::new(name),
            Value::Function(Function::Builtin(BuiltinFunction {
                name: name.to_string(),
                arity,
                func: Rc::new(func),
            })),
        );
    }

    /// `(add a b ...)` sums an arbitrary-length list of integers.
    fn add(args: Vec<Value>) -> RuntimeResult<Value> {
        let mut sum: i64 = 0;
        for (position, arg) in args.iter().enumerate() {
            let Some(n) = arg.as_integer() else {
                return Err(RuntimeError::TypeError {
                    operation: "add".to_string(),
                    position,
                    expected: "an integer".to_string(),
                    actual: arg.to_string(),
                });
            };
            sum = sum
                .checked_add(n)
                .ok_or_else(|| RuntimeError::IntegerOverflow {
                    operation: "add".to_string(),
                    position,
                })?;
        }
        Ok(Value::Sexp(SExp::Integer(sum)))
    }
}
