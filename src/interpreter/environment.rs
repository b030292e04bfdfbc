use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::error::{RuntimeError, RuntimeResult};
use super::library;
use super::value::Value;

/// One scope of the environment chain. Scopes are populated once, when they
/// are created, and are read-only afterwards; cloning an `Environment` only
/// shares the scope.
///
/// A scope can only hold closures over scopes that existed before it, so the
/// parent chain is acyclic and reference counting reclaims it.
#[derive(Clone)]
pub struct Environment(Rc<Scope>);

struct Scope {
    bindings: HashMap<String, Value>,
    parent: Option<Environment>,
}

impl Environment {
    /// A root scope holding the base library.
    pub fn library() -> Self {
        Self::root(library::bindings())
    }

    pub fn root<I: IntoIterator<Item = (String, Value)>>(bindings: I) -> Self {
        Self(Rc::new(Scope {
            bindings: bindings.into_iter().collect(),
            parent: None,
        }))
    }

    /// A new scope layered on top of `self`.
    pub fn extend<I: IntoIterator<Item = (String, Value)>>(&self, bindings: I) -> Self {
        Self(Rc::new(Scope {
            bindings: bindings.into_iter().collect(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<&Environment> {
        self.0.parent.as_ref()
    }

    /// Searches this scope, then each enclosing one outwards.
    pub fn lookup<A: AsRef<str>>(&self, symbol: A) -> RuntimeResult<Value> {
        let symbol = symbol.as_ref();
        let mut scope = Some(self);
        while let Some(env) = scope {
            if let Some(value) = env.0.bindings.get(symbol) {
                return Ok(value.clone());
            }
            scope = env.parent();
        }
        Err(RuntimeError::UnboundIdentifier(symbol.to_string()))
    }

    pub fn is_bound<A: AsRef<str>>(&self, symbol: A) -> bool {
        self.lookup(symbol).is_ok()
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.parent();
        while let Some(env) = scope {
            depth += 1;
            scope = env.parent();
        }
        depth
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols = self.0.bindings.keys().collect::<Vec<_>>();
        symbols.sort();
        f.debug_struct("Environment")
            .field("symbols", &symbols)
            .field("depth", &self.depth())
            .finish()
    }
}
