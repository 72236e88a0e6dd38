// Errors produced while executing compiled nodes. No kind is recovered
// internally: every error aborts the current top-level expression and is
// surfaced verbatim to the front end.

use crate::ast::Symbol;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Lookup exhausted the entire environment chain.
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(Symbol),

    /// A callable was invoked with the wrong number of arguments.
    #[error("arity mismatch in {function}: expected {expected}, got {actual}")]
    ArityMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    /// The head of an application evaluated to a non-callable value.
    #[error("not callable: {0}")]
    NotCallable(String),

    /// A primitive rejected one of its (fully evaluated) arguments.
    #[error("{operation}: argument [{position}] is not {expected}: {actual}")]
    TypeError {
        operation: String,
        position: usize,
        expected: String,
        actual: String,
    },

    /// A primitive's integer arithmetic left the representable range.
    #[error("{operation}: integer overflow at argument [{position}]")]
    IntegerOverflow { operation: String, position: usize },
}
