// AST compiler: maps a symbolic expression into exactly one executable
// node, validating special-form shape here so malformed forms fail
// before any evaluation occurs.

use crate::ast::{SExp, Symbol};
use crate::runtime::values::Value;
use std::rc::Rc;
use thiserror::Error;

/// Executable representation of one expression. A node is produced once
/// by [`compile`] and is immutable thereafter; it may be evaluated any
/// number of times (a closure body runs once per invocation).
#[derive(Debug, Clone)]
pub enum Node {
    /// A value that needs no environment access: integer and string
    /// literals, quoted forms, and the empty list.
    Literal(Value),
    /// Symbol resolution through the environment chain.
    Lookup(Symbol),
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    Set {
        symbol: Symbol,
        value: Box<Node>,
    },
    /// Body nodes sit behind `Rc` so every closure minted from this node
    /// shares one body allocation.
    Lambda {
        params: Vec<Symbol>,
        body: Rc<Vec<Node>>,
    },
    Application {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
}

/// Structural errors detected while building the AST. Each carries the
/// rendered offending form; compilation of a top-level expression either
/// fully succeeds or fails with no state change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("if requires 2 or 3 arguments, got {got}: {form}")]
    MalformedIf { got: usize, form: String },

    #[error("set requires exactly 2 arguments, got {got}: {form}")]
    MalformedSet { got: usize, form: String },

    #[error("first argument to set must be a symbol, got {found}: {form}")]
    SetTargetNotSymbol { found: String, form: String },

    #[error("quote requires exactly 1 argument, got {got}: {form}")]
    MalformedQuote { got: usize, form: String },

    #[error("lambda requires a parameter list and at least one body expression: {form}")]
    MalformedLambda { form: String },

    #[error("lambda parameters must be a list of symbols, got {found}: {form}")]
    LambdaParamsNotSymbols { found: String, form: String },
}

/// Compile a symbolic expression into its executable node.
pub fn compile(sexp: &SExp) -> Result<Node, CompileError> {
    match sexp {
        SExp::Integer(_) | SExp::String(_) => Ok(Node::Literal(Value::Sexp(sexp.clone()))),
        SExp::Symbol(sym) => Ok(Node::Lookup(sym.clone())),
        SExp::List(items) => compile_list(sexp, items),
    }
}

fn compile_list(form: &SExp, items: &[SExp]) -> Result<Node, CompileError> {
    let Some(head) = items.first() else {
        return Ok(Node::Literal(Value::nil()));
    };
    if let Some(sym) = head.as_symbol() {
        match sym.0.as_str() {
            "if" => return compile_if(form, items),
            "set" => return compile_set(form, items),
            "quote" => return compile_quote(form, items),
            "lambda" => return compile_lambda(form, items),
            _ => {}
        }
    }
    compile_application(items)
}

/// `(if cond then)` or `(if cond then else)`; the else branch defaults
/// to a nil literal.
fn compile_if(form: &SExp, items: &[SExp]) -> Result<Node, CompileError> {
    if items.len() != 3 && items.len() != 4 {
        return Err(CompileError::MalformedIf {
            got: items.len() - 1,
            form: form.to_string(),
        });
    }
    let else_branch = match items.get(3) {
        Some(sexp) => compile(sexp)?,
        None => Node::Literal(Value::nil()),
    };
    Ok(Node::If {
        condition: Box::new(compile(&items[1])?),
        then_branch: Box::new(compile(&items[2])?),
        else_branch: Box::new(else_branch),
    })
}

fn compile_set(form: &SExp, items: &[SExp]) -> Result<Node, CompileError> {
    if items.len() != 3 {
        return Err(CompileError::MalformedSet {
            got: items.len() - 1,
            form: form.to_string(),
        });
    }
    let Some(symbol) = items[1].as_symbol() else {
        return Err(CompileError::SetTargetNotSymbol {
            found: items[1].type_name().to_string(),
            form: form.to_string(),
        });
    };
    Ok(Node::Set {
        symbol: symbol.clone(),
        value: Box::new(compile(&items[2])?),
    })
}

/// The quoted form is wrapped verbatim, uncompiled; evaluating the node
/// returns it as plain data.
fn compile_quote(form: &SExp, items: &[SExp]) -> Result<Node, CompileError> {
    if items.len() != 2 {
        return Err(CompileError::MalformedQuote {
            got: items.len() - 1,
            form: form.to_string(),
        });
    }
    Ok(Node::Literal(Value::Sexp(items[1].clone())))
}

fn compile_lambda(form: &SExp, items: &[SExp]) -> Result<Node, CompileError> {
    if items.len() < 3 {
        return Err(CompileError::MalformedLambda {
            form: form.to_string(),
        });
    }
    let Some(param_list) = items[1].as_list() else {
        return Err(CompileError::LambdaParamsNotSymbols {
            found: items[1].type_name().to_string(),
            form: form.to_string(),
        });
    };
    let mut params = Vec::with_capacity(param_list.len());
    for param in param_list {
        let Some(sym) = param.as_symbol() else {
            return Err(CompileError::LambdaParamsNotSymbols {
                found: param.type_name().to_string(),
                form: form.to_string(),
            });
        };
        params.push(sym.clone());
    }
    let body = items[2..]
        .iter()
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::Lambda {
        params,
        body: Rc::new(body),
    })
}

fn compile_application(items: &[SExp]) -> Result<Node, CompileError> {
    let callee = compile(&items[0])?;
    let arguments = items[1..]
        .iter()
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::Application {
        callee: Box::new(callee),
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn compile_str(input: &str) -> Result<Node, CompileError> {
        compile(&parse_expression(input).expect("test input should parse"))
    }

    #[test]
    fn literals_and_symbols_compile_directly() {
        assert!(matches!(compile_str("42"), Ok(Node::Literal(_))));
        assert!(matches!(compile_str("\"hi\""), Ok(Node::Literal(_))));
        assert!(matches!(compile_str("x"), Ok(Node::Lookup(_))));
    }

    #[test]
    fn empty_list_compiles_to_nil_literal() {
        match compile_str("()") {
            Ok(Node::Literal(value)) => assert!(value.is_nil()),
            other => panic!("expected nil literal, got {:?}", other),
        }
    }

    #[test]
    fn if_without_else_defaults_to_nil() {
        match compile_str("(if x 1)") {
            Ok(Node::If { else_branch, .. }) => match *else_branch {
                Node::Literal(value) => assert!(value.is_nil()),
                other => panic!("expected nil literal else branch, got {:?}", other),
            },
            other => panic!("expected if node, got {:?}", other),
        }
    }

    #[test]
    fn if_with_wrong_arity_is_rejected() {
        assert!(matches!(
            compile_str("(if x)"),
            Err(CompileError::MalformedIf { got: 1, .. })
        ));
        assert!(matches!(
            compile_str("(if a b c d)"),
            Err(CompileError::MalformedIf { got: 4, .. })
        ));
    }

    #[test]
    fn set_requires_a_symbol_target() {
        assert!(matches!(
            compile_str("(set 1 2)"),
            Err(CompileError::SetTargetNotSymbol { .. })
        ));
        assert!(matches!(
            compile_str("(set x)"),
            Err(CompileError::MalformedSet { got: 1, .. })
        ));
        assert!(matches!(compile_str("(set x 2)"), Ok(Node::Set { .. })));
    }

    #[test]
    fn quote_wraps_the_form_uncompiled() {
        match compile_str("(quote (a b c))") {
            Ok(Node::Literal(Value::Sexp(sexp))) => {
                assert_eq!(sexp.to_string(), "(a b c)");
            }
            other => panic!("expected literal node, got {:?}", other),
        }
        assert!(matches!(
            compile_str("(quote a b)"),
            Err(CompileError::MalformedQuote { got: 2, .. })
        ));
    }

    #[test]
    fn lambda_shape_is_validated() {
        assert!(matches!(
            compile_str("(lambda (x))"),
            Err(CompileError::MalformedLambda { .. })
        ));
        assert!(matches!(
            compile_str("(lambda x x)"),
            Err(CompileError::LambdaParamsNotSymbols { .. })
        ));
        assert!(matches!(
            compile_str("(lambda (x 1) x)"),
            Err(CompileError::LambdaParamsNotSymbols { .. })
        ));
        match compile_str("(lambda (x y) (add x y) x)") {
            Ok(Node::Lambda { params, body }) => {
                assert_eq!(params.len(), 2);
                assert_eq!(body.len(), 2);
            }
            other => panic!("expected lambda node, got {:?}", other),
        }
    }

    #[test]
    fn reserved_names_only_apply_in_head_position() {
        // `if` as an argument is an ordinary lookup.
        match compile_str("(f if)") {
            Ok(Node::Application { arguments, .. }) => {
                assert!(matches!(arguments[0], Node::Lookup(_)));
            }
            other => panic!("expected application, got {:?}", other),
        }
    }

    #[test]
    fn compile_errors_inside_nested_forms_propagate() {
        assert!(matches!(
            compile_str("(add 1 (quote))"),
            Err(CompileError::MalformedQuote { got: 0, .. })
        ));
    }
}
