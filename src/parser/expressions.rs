use super::errors::ParseError;
use super::Rule;
use crate::ast::{SExp, Symbol};
use pest::iterators::Pair;

pub(super) fn build_expression(pair: Pair<Rule>) -> Result<SExp, ParseError> {
    match pair.as_rule() {
        Rule::list => pair
            .into_inner()
            .map(build_expression)
            .collect::<Result<Vec<_>, _>>()
            .map(SExp::List),
        Rule::integer => {
            let text = pair.as_str();
            text.parse::<i64>().map(SExp::Integer).map_err(|_| {
                ParseError::MalformedInteger {
                    text: text.to_string(),
                }
            })
        }
        Rule::string => {
            // Strip the surrounding quotes; escape sequences stay raw.
            let raw = pair.as_str();
            Ok(SExp::String(raw[1..raw.len() - 1].to_string()))
        }
        Rule::symbol => Ok(SExp::Symbol(Symbol(pair.as_str().to_string()))),
        rule => Err(ParseError::UnexpectedRule {
            rule,
            text: pair.as_str().to_string(),
        }),
    }
}
