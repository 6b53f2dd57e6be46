//! Action schemas and ground action instances.
//!
//! A single `Action` type covers both: a schema has variables in its
//! parameter list, preconditions or effects; a ground action has none.
//! Schemas are built from the textual notation:
//!
//! ```
//! use planner::Action;
//!
//! let eat = Action::parse("Eat(person, food)",
//!                         "Human(person) & Hungry(person)",
//!                         "Eaten(food) & ~Hungry(person)").unwrap();
//! assert!(!eat.is_ground());
//! ```
//!
//! A typing clause (`with_typing`) restricts grounding to type-consistent
//! argument permutations; its literals are also appended to the
//! preconditions so that the start of a plan establishes them, matching
//! the reference behavior.

use logic::{parse_conjunction, parse_literal, Bindings, Literal, ParseError, State, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlanningError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub params: Vec<Term>,
    pub precond: Vec<Literal>,
    pub effect: Vec<Literal>,
    /// Type constraints on the parameters, empty for untyped schemas.
    pub typing: Vec<Literal>,
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Term>,
        precond: Vec<Literal>,
        effect: Vec<Literal>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            precond,
            effect,
            typing: Vec::new(),
        }
    }

    /// Build a schema from the textual notation: a head literal plus
    /// precondition and effect conjunctions.
    pub fn parse(head: &str, precond: &str, effect: &str) -> Result<Self, ParseError> {
        let head = parse_literal(head)?;
        Ok(Self::new(
            head.predicate,
            head.args,
            parse_conjunction(precond)?,
            parse_conjunction(effect)?,
        ))
    }

    /// Attach a typing clause. Its literals become part of the
    /// preconditions as well as the grounding filter.
    pub fn with_typing(mut self, clause: &str) -> Result<Self, ParseError> {
        let typing = parse_conjunction(clause)?;
        self.precond.extend(typing.iter().cloned());
        self.typing = typing;
        Ok(self)
    }

    /// The action-call literal `Name(args…)`.
    pub fn head(&self) -> Literal {
        Literal::positive(self.name.clone(), self.params.clone())
    }

    pub fn is_ground(&self) -> bool {
        self.params.iter().all(|p| !p.is_variable())
            && self.precond.iter().all(Literal::is_ground)
            && self.effect.iter().all(Literal::is_ground)
    }

    /// Substitute every variable occurrence per `bindings`. Returns
    /// `None` when a referenced variable stays unresolved, since a
    /// partially ground action is useless to the search.
    pub fn ground(&self, bindings: &Bindings) -> Option<Action> {
        let grounded = Action {
            name: self.name.clone(),
            params: self.params.iter().map(|p| bindings.resolve(p)).collect(),
            precond: self.precond.iter().map(|l| l.substitute(bindings)).collect(),
            effect: self.effect.iter().map(|l| l.substitute(bindings)).collect(),
            typing: self.typing.iter().map(|l| l.substitute(bindings)).collect(),
        };
        if grounded.is_ground() {
            Some(grounded)
        } else {
            None
        }
    }

    /// The delete-list-free copy: all negated effects removed. Used by
    /// external relaxation heuristics, not by the plan-space search.
    pub fn relaxed(&self) -> Action {
        Action {
            name: self.name.clone(),
            params: self.params.clone(),
            precond: self.precond.clone(),
            effect: self
                .effect
                .iter()
                .filter(|effect| !effect.negated)
                .cloned()
                .collect(),
            typing: self.typing.clone(),
        }
    }

    /// True iff every precondition literal is present in `state`.
    pub fn check_precond(&self, state: &State) -> bool {
        state.satisfies_all(&self.precond)
    }

    /// Apply this ground action to `state`, producing the successor
    /// state. Each effect is asserted and its complement retracted.
    pub fn apply(&self, state: &State) -> Result<State, PlanningError> {
        if !self.check_precond(state) {
            return Err(PlanningError::PreconditionUnsatisfied {
                action: self.to_string(),
            });
        }
        let mut next = state.clone();
        for effect in &self.effect {
            next.assert_fact(effect.clone());
        }
        Ok(next)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_table() -> Action {
        Action::parse(
            "ToTable(x, y)",
            "On(x, y) & Clear(x)",
            "~On(x, y) & Clear(y) & OnTable(x)",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_builds_schema() {
        let schema = to_table();
        assert_eq!(schema.name, "ToTable");
        assert_eq!(schema.params.len(), 2);
        assert_eq!(schema.precond.len(), 2);
        assert_eq!(schema.effect.len(), 3);
        assert!(!schema.is_ground());
    }

    #[test]
    fn test_ground_requires_full_bindings() {
        let schema = to_table();
        let mut bindings = Bindings::new();
        bindings.bind("x", Term::constant("A"));
        assert!(schema.ground(&bindings).is_none());

        bindings.bind("y", Term::constant("B"));
        let ground = schema.ground(&bindings).unwrap();
        assert!(ground.is_ground());
        assert_eq!(ground.to_string(), "ToTable(A, B)");
        assert_eq!(ground.effect[0], parse_literal("~On(A, B)").unwrap());
    }

    #[test]
    fn test_relaxed_drops_negated_effects() {
        let relaxed = to_table().relaxed();
        assert_eq!(relaxed.effect.len(), 2);
        assert!(relaxed.effect.iter().all(|e| !e.negated));
        // Preconditions are untouched.
        assert_eq!(relaxed.precond, to_table().precond);
    }

    #[test]
    fn test_apply_flips_affected_literals() {
        let state = State::from_literals(parse_conjunction("On(A, B) & Clear(A)").unwrap());
        let mut bindings = Bindings::new();
        bindings.bind("x", Term::constant("A"));
        bindings.bind("y", Term::constant("B"));
        let ground = to_table().ground(&bindings).unwrap();

        let next = ground.apply(&state).unwrap();
        assert!(!next.holds(&parse_literal("On(A, B)").unwrap()));
        assert!(next.holds(&parse_literal("~On(A, B)").unwrap()));
        assert!(next.holds(&parse_literal("Clear(B)").unwrap()));
        assert!(next.holds(&parse_literal("OnTable(A)").unwrap()));
    }

    #[test]
    fn test_apply_rejects_unsatisfied_precondition() {
        let state = State::from_literals(parse_conjunction("Clear(A)").unwrap());
        let mut bindings = Bindings::new();
        bindings.bind("x", Term::constant("A"));
        bindings.bind("y", Term::constant("B"));
        let ground = to_table().ground(&bindings).unwrap();

        match ground.apply(&state).unwrap_err() {
            PlanningError::PreconditionUnsatisfied { action } => {
                assert_eq!(action, "ToTable(A, B)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_typing_clause_extends_preconditions() {
        let schema = Action::parse("Move(b, x, y)", "On(b, x) & Clear(b) & Clear(y)", "On(b, y)")
            .unwrap()
            .with_typing("Block(b) & Block(y)")
            .unwrap();
        assert_eq!(schema.typing.len(), 2);
        assert_eq!(schema.precond.len(), 5);
        assert!(schema.precond.contains(&parse_literal("Block(b)").unwrap()));
    }
}
