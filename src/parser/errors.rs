use super::Rule;
use thiserror::Error;

/// Errors reported by the reader. Grammar-level violations (unrecognized
/// characters, missing separators, unmatched parentheses) surface as
/// `Syntax` with the offending location; the remaining variants cover
/// structural checks performed while building the tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(Box<pest::error::Error<Rule>>),

    #[error("integer literal '{text}' is out of range")]
    MalformedInteger { text: String },

    #[error("expected a single expression, found {found}")]
    ExpectedSingleExpression { found: usize },

    #[error("unexpected {rule:?} at '{text}'")]
    UnexpectedRule { rule: Rule, text: String },
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        ParseError::Syntax(Box::new(err))
    }
}
