//! Terms and variable bindings
//!
//! A term is either a constant (a concrete object such as `A` or `Table`)
//! or a variable (an unbound placeholder such as `x`). By the notation
//! convention inherited from the problem corpus, identifiers starting with
//! a lowercase letter are variables and everything else is a constant.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constant object or an unbound variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Constant(String),
    Variable(String),
}

impl Term {
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Term::Constant(name) | Term::Variable(name) => name,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A transient mapping from variable names to terms, produced by
/// unification and consumed by grounding. A variable may be bound to
/// another variable (when one schema references another's parameters);
/// [`Bindings::resolve`] follows such chains to the end.
///
/// Bindings are never persisted into the model once an action is ground.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    map: IndexMap<String, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `var` to `term`. The caller is expected to bind only
    /// unresolved variables; rebinding replaces the previous entry.
    pub fn bind(&mut self, var: impl Into<String>, term: Term) {
        self.map.insert(var.into(), term);
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Follow variable bindings until a constant or an unbound variable is
    /// reached. Chains are finite because a variable is only ever bound to
    /// the resolved form of another term.
    pub fn resolve(&self, term: &Term) -> Term {
        let mut current = term.clone();
        while let Term::Variable(name) = &current {
            match self.map.get(name) {
                Some(next) => current = next.clone(),
                None => break,
            }
        }
        current
    }
}
