//! Literals: a predicate applied to an ordered argument list, with an
//! explicit polarity flag.
//!
//! Negation is a field, not a naming convention: `~On(A, B)` is
//! `Literal { predicate: "On", negated: true, .. }`. The complementary
//! form of a literal is the same predicate and arguments with the flag
//! flipped, and a fact state never holds both forms at once (see
//! [`crate::State`]).

use crate::term::{Bindings, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: String,
    pub args: Vec<Term>,
    pub negated: bool,
}

impl Literal {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>, negated: bool) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            negated,
        }
    }

    pub fn positive(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Self::new(predicate, args, false)
    }

    pub fn negative(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Self::new(predicate, args, true)
    }

    /// The same atom with the opposite polarity.
    pub fn complement(&self) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            negated: !self.negated,
        }
    }

    /// True iff no argument is a variable.
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(|arg| !arg.is_variable())
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Replace every variable occurrence per `bindings`. Unbound
    /// variables are left in place.
    pub fn substitute(&self, bindings: &Bindings) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|arg| bindings.resolve(arg)).collect(),
            negated: self.negated,
        }
    }

    /// Same predicate and arguments, opposite polarity.
    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.negated != other.negated
            && self.predicate == other.predicate
            && self.args == other.args
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }
        write!(f, "{}", self.predicate)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
