// Environment for variable bindings and scope management.
//
// Environments form a chain: resolution walks from the innermost scope
// outward, first-found wins. A child's parent pointer is fixed at
// creation and parents never point back at children, so the chain is
// acyclic by construction. Environments are shared by reference
// (`Rc<RefCell<_>>`): every closure captured in a scope sees mutations
// made through any other holder of that scope.

use crate::ast::Symbol;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::values::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create a new empty root environment.
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    /// Create a new empty environment chained to a parent scope.
    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Insert or overwrite a binding in this environment's own table,
    /// never an ancestor's.
    pub fn define(&mut self, symbol: &Symbol, value: Value) {
        self.bindings.insert(symbol.0.clone(), value);
    }

    /// Resolve a symbol through the chain, innermost first.
    pub fn lookup(&self, symbol: &Symbol) -> RuntimeResult<Value> {
        if let Some(value) = self.bindings.get(&symbol.0) {
            Ok(value.clone())
        } else if let Some(parent) = &self.parent {
            parent.borrow().lookup(symbol)
        } else {
            Err(RuntimeError::UndefinedSymbol(symbol.clone()))
        }
    }

    /// Whether this environment (not an ancestor) binds the symbol.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.bindings.contains_key(&symbol.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
