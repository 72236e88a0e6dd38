// Runtime value system: what evaluation produces, as opposed to the
// symbolic expressions the reader produces and the nodes the compiler
// produces.

use crate::ast::{SExp, Symbol};
use crate::compiler::Node;
use crate::runtime::environment::Environment;
use crate::runtime::error::RuntimeError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A wrapped literal expression: integer, string, or (possibly
    /// quoted) list. Plain data, shared freely.
    Sexp(SExp),
    Function(Function),
}

impl Value {
    /// The canonical nil value: the wrapped empty list.
    pub fn nil() -> Self {
        Value::Sexp(SExp::nil())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Sexp(sexp) if sexp.is_nil())
    }

    /// The only false value is nil; integer zero, the empty string and
    /// functions are all truthy.
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Sexp(sexp) => sexp.as_integer(),
            Value::Function(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Sexp(sexp) => sexp.type_name(),
            Value::Function(Function::Builtin(_)) => "builtin",
            Value::Function(Function::Closure(_)) => "lambda",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Sexp(sexp) => write!(f, "{}", sexp),
            Value::Function(Function::Closure(_)) => write!(f, "#<lambda>"),
            Value::Function(Function::Builtin(builtin)) => {
                write!(f, "#<builtin:{}>", builtin.name)
            }
        }
    }
}

#[derive(Clone)]
pub enum Function {
    Builtin(BuiltinFunction),
    Closure(Rc<Closure>),
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
            Function::Closure(closure) => f
                .debug_struct("Closure")
                .field("params", &closure.params)
                .finish_non_exhaustive(),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Builtin(a), Function::Builtin(b)) => a == b,
            (Function::Closure(a), Function::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A user-defined function: parameter names, body nodes, and the
/// environment captured by reference where the lambda was evaluated.
/// Closures created in the same lexical scope share one environment
/// instance, so a `set` through one is visible through the others.
#[derive(Clone)]
pub struct Closure {
    pub params: Vec<Symbol>,
    pub body: Rc<Vec<Node>>,
    pub env: Rc<RefCell<Environment>>,
}

/// A host-registered callable exposed to the language as an ordinary
/// applicable value.
#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: String,
    pub arity: Arity,
    pub func: Rc<dyn Fn(Vec<Value>) -> Result<Value, RuntimeError>>,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        // Builtins compare by name and arity, not by function pointer.
        self.name == other.name && self.arity == other.arity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// Minimum number of arguments.
    Variadic(usize),
}

impl Arity {
    pub fn accepts(&self, arg_count: usize) -> bool {
        match self {
            Arity::Fixed(n) => arg_count == *n,
            Arity::Variadic(min) => arg_count >= *min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic(min) => write!(f, "at least {}", min),
        }
    }
}
