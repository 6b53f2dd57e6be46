//! Fact states.
//!
//! A state is an insertion-ordered set of ground literals. Negative
//! literals are first-class facts: asserting `~At(Flat, Axle)` stores the
//! negated form and retracts `At(Flat, Axle)` if present. The invariant is
//! that a state never holds a literal and its complement simultaneously.

use crate::literal::Literal;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    facts: IndexSet<Literal>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_literals(facts: impl IntoIterator<Item = Literal>) -> Self {
        let mut state = Self::new();
        for fact in facts {
            state.assert_fact(fact);
        }
        state
    }

    /// Insert a fact, retracting its complement first so the single-sign
    /// invariant holds by construction.
    pub fn assert_fact(&mut self, fact: Literal) {
        self.facts.shift_remove(&fact.complement());
        self.facts.insert(fact);
    }

    pub fn retract(&mut self, fact: &Literal) -> bool {
        self.facts.shift_remove(fact)
    }

    pub fn holds(&self, fact: &Literal) -> bool {
        self.facts.contains(fact)
    }

    pub fn satisfies_all<'a>(&self, facts: impl IntoIterator<Item = &'a Literal>) -> bool {
        facts.into_iter().all(|fact| self.holds(fact))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fact) in self.facts.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{fact}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;
    use pretty_assertions::assert_eq;

    fn at(obj: &str, loc: &str) -> Literal {
        Literal::positive("At", vec![Term::constant(obj), Term::constant(loc)])
    }

    #[test]
    fn test_assert_fact_retracts_complement() {
        let mut state = State::from_literals([at("Flat", "Axle")]);
        assert!(state.holds(&at("Flat", "Axle")));

        state.assert_fact(at("Flat", "Axle").complement());
        assert!(!state.holds(&at("Flat", "Axle")));
        assert!(state.holds(&at("Flat", "Axle").complement()));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_assert_fact_is_idempotent() {
        let mut state = State::new();
        state.assert_fact(at("Spare", "Trunk"));
        state.assert_fact(at("Spare", "Trunk"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_satisfies_all() {
        let state = State::from_literals([at("C1", "SFO"), at("C2", "JFK")]);
        assert!(state.satisfies_all(&[at("C1", "SFO")]));
        assert!(!state.satisfies_all(&[at("C1", "SFO"), at("C1", "JFK")]));
    }
}
