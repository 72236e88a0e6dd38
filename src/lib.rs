// tinylisp - a line-oriented interpreter for a minimal Lisp-like language
//
// Pipeline: source text -> symbolic expressions (parser) -> AST nodes
// (compiler) -> runtime values (runtime::evaluator), threaded through one
// persistent environment per session.

pub mod ast;
pub mod compiler;
pub mod parser;
pub mod runtime;

pub use ast::{SExp, Symbol};
pub use compiler::{compile, CompileError, Node};
pub use parser::ParseError;
pub use runtime::{Environment, Evaluator, Interpreter, RuntimeError, Value};

use thiserror::Error;

/// Unified error for a full parse-compile-evaluate pass. Each pipeline
/// stage keeps its own error type; this exists so front ends can report
/// any stage's failure through one channel.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] parser::ParseError),
    #[error(transparent)]
    Compile(#[from] compiler::CompileError),
    #[error(transparent)]
    Runtime(#[from] runtime::RuntimeError),
}
