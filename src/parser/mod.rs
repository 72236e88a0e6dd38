// Reader: turns source text into symbolic expressions.
//
// Recursive descent is driven by the pest grammar in src/tinylisp.pest.
// The reader knows nothing about language semantics; `if` and `lambda`
// are ordinary symbols at this stage.

pub mod errors;
mod expressions;

pub use errors::ParseError;

use crate::ast::SExp;
use expressions::build_expression;
use pest::Parser;

#[derive(pest_derive::Parser)]
#[grammar = "tinylisp.pest"]
struct TinylispParser;

/// Parse one line of source text into its ordered sequence of symbolic
/// expressions. Empty input is valid and yields an empty sequence.
pub fn parse(input: &str) -> Result<Vec<SExp>, ParseError> {
    let pairs = TinylispParser::parse(Rule::program, input)?;
    let program = pairs
        .peek()
        .expect("parse always yields exactly one program pair");
    program
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(build_expression)
        .collect()
}

/// Parse input expected to hold exactly one expression (useful for
/// embedding and tests).
pub fn parse_expression(input: &str) -> Result<SExp, ParseError> {
    let mut sexps = parse(input)?;
    if sexps.len() == 1 {
        Ok(sexps.remove(0))
    } else {
        Err(ParseError::ExpectedSingleExpression { found: sexps.len() })
    }
}
