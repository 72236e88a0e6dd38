// Runtime system: environment chain, evaluator, standard library, and
// the runtime value model.

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod stdlib;
pub mod values;

pub use environment::Environment;
pub use error::{RuntimeError, RuntimeResult};
pub use evaluator::Evaluator;
pub use stdlib::StandardLibrary;
pub use values::{Arity, BuiltinFunction, Closure, Function, Value};

use crate::ast::SExp;
use crate::compiler::compile;
use crate::parser;
use crate::Error;

/// One interpreter session: an evaluator over a persistent root
/// environment. Every expression run through the same session sees the
/// bindings established by earlier ones.
pub struct Interpreter {
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            evaluator: Evaluator::new(),
        }
    }

    /// Compile and evaluate one symbolic expression.
    pub fn run(&self, sexp: &SExp) -> Result<Value, Error> {
        let node = compile(sexp)?;
        Ok(self.evaluator.evaluate(&node)?)
    }

    /// Parse, compile and evaluate a chunk of source text, returning the
    /// value of each expression in order. Stops at the first error;
    /// side effects of expressions that already ran remain in effect.
    pub fn run_source(&self, source: &str) -> Result<Vec<Value>, Error> {
        let sexps = parser::parse(source)?;
        let mut values = Vec::with_capacity(sexps.len());
        for sexp in &sexps {
            values.push(self.run(sexp)?);
        }
        Ok(values)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
