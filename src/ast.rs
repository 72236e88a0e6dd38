// Symbolic expression data model.
//
// An SExp is the parsed, pre-semantic form of source text. It is pure
// data: it carries no behavior and is safe to share and re-evaluate any
// number of times (a quoted form is returned as a value verbatim).

use itertools::Itertools;
use std::fmt;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum SExp {
    /// Ordered sequence of sub-expressions. The empty list is the
    /// canonical nil value.
    List(Vec<SExp>),
    Symbol(Symbol),
    Integer(i64),
    /// Quoted string literal. Escape sequences are recognized by the
    /// reader but stored raw, never processed.
    String(String),
}

impl SExp {
    /// The canonical nil value: the empty list.
    pub fn nil() -> Self {
        SExp::List(vec![])
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, SExp::List(items) if items.is_empty())
    }

    pub fn as_list(&self) -> Option<&[SExp]> {
        match self {
            SExp::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            SExp::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SExp::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SExp::List(_) => "list",
            SExp::Symbol(_) => "symbol",
            SExp::Integer(_) => "integer",
            SExp::String(_) => "string",
        }
    }
}

impl fmt::Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExp::List(items) => {
                write!(f, "({})", items.iter().map(|item| item.to_string()).join(" "))
            }
            SExp::Symbol(sym) => write!(f, "{}", sym),
            SExp::Integer(n) => write!(f, "{}", n),
            SExp::String(s) => write!(f, "\"{}\"", s),
        }
    }
}
