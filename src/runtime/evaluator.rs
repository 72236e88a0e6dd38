// Evaluator: executes compiled nodes against an environment chain.
//
// Evaluation is a single-threaded, strictly depth-first recursive walk
// with no suspension points; every call either returns a value or
// propagates an error upward unchanged.

use crate::compiler::Node;
use crate::runtime::environment::Environment;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::stdlib::StandardLibrary;
use crate::runtime::values::{Closure, Function, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub struct Evaluator {
    /// The session's root environment: pre-populated with the standard
    /// library and mutated by top-level `set` forms for the session's
    /// whole lifetime.
    pub env: Rc<RefCell<Environment>>,
}

impl Evaluator {
    /// Create an evaluator with a fresh standard-library environment.
    pub fn new() -> Self {
        Evaluator {
            env: StandardLibrary::create_global_environment(),
        }
    }

    /// Create an evaluator over an explicitly constructed root
    /// environment, so independent sessions can coexist.
    pub fn with_env(env: Rc<RefCell<Environment>>) -> Self {
        Evaluator { env }
    }

    /// Evaluate a node against the session's root environment.
    pub fn evaluate(&self, node: &Node) -> RuntimeResult<Value> {
        self.eval_node(node, &self.env)
    }

    /// Evaluate a node against a given environment.
    pub fn eval_node(&self, node: &Node, env: &Rc<RefCell<Environment>>) -> RuntimeResult<Value> {
        match node {
            Node::Literal(value) => Ok(value.clone()),
            Node::Lookup(symbol) => env.borrow().lookup(symbol),
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                // Exactly one branch runs.
                if self.eval_node(condition, env)?.is_truthy() {
                    self.eval_node(then_branch, env)
                } else {
                    self.eval_node(else_branch, env)
                }
            }
            Node::Set { symbol, value } => {
                let value = self.eval_node(value, env)?;
                env.borrow_mut().define(symbol, value.clone());
                // Assignment is an expression: it yields the assigned value.
                Ok(value)
            }
            Node::Lambda { params, body } => {
                // The body is not evaluated; the current environment is
                // captured by reference.
                Ok(Value::Function(Function::Closure(Rc::new(Closure {
                    params: params.clone(),
                    body: Rc::clone(body),
                    env: Rc::clone(env),
                }))))
            }
            Node::Application { callee, arguments } => {
                let func = self.eval_node(callee, env)?;
                // Arguments evaluate left to right in the caller's
                // environment, never lazily.
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.eval_node(argument, env)?);
                }
                self.call_function(func, args)
            }
        }
    }

    /// Apply a callable value to fully evaluated arguments.
    pub fn call_function(&self, func: Value, args: Vec<Value>) -> RuntimeResult<Value> {
        match func {
            Value::Function(Function::Closure(closure)) => self.call_closure(&closure, args),
            Value::Function(Function::Builtin(builtin)) => {
                if !builtin.arity.accepts(args.len()) {
                    return Err(RuntimeError::ArityMismatch {
                        function: format!("#<builtin:{}>", builtin.name),
                        expected: builtin.arity.to_string(),
                        actual: args.len(),
                    });
                }
                (builtin.func)(args)
            }
            other => Err(RuntimeError::NotCallable(format!(
                "{} ({})",
                other,
                other.type_name()
            ))),
        }
    }

    fn call_closure(&self, closure: &Closure, args: Vec<Value>) -> RuntimeResult<Value> {
        if closure.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                function: "#<lambda>".to_string(),
                expected: closure.params.len().to_string(),
                actual: args.len(),
            });
        }
        // Parameters bind into a fresh environment per invocation,
        // parented by the captured environment. Re-entrant calls of the
        // same closure therefore keep their frames separate while free
        // variables still resolve through the shared captured scope.
        let call_env = Rc::new(RefCell::new(Environment::with_parent(Rc::clone(
            &closure.env,
        ))));
        for (param, arg) in closure.params.iter().zip(args) {
            call_env.borrow_mut().define(param, arg);
        }
        // Sequential body: earlier expressions run for their side
        // effects, the last value is the result.
        let mut result = Value::nil();
        for node in closure.body.iter() {
            result = self.eval_node(node, &call_env)?;
        }
        Ok(result)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
