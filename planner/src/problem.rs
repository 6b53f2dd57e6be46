//! Planning problems and the grounding service.
//!
//! A problem holds the initial fact state, the goal literals and the
//! action-schema library. It offers goal testing and single-step
//! execution for demonstration and validation, and the grounding service
//! (`expand_actions` / `expand_fluents`) that eagerly enumerates the
//! well-typed ground instances the search engine consumes. The
//! enumeration is combinatorial in object count and schema arity by
//! design; it is a precomputed resource, not part of the search itself.

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use logic::{parse_conjunction, unify, Literal, ParseError, State, Term};
use tracing::debug;

use crate::action::Action;
use crate::error::PlanningError;

#[derive(Debug, Clone)]
pub struct PlanningProblem {
    initial: State,
    goals: Vec<Literal>,
    schemas: Vec<Action>,
    /// Ground typing facts (e.g. `Block(A)`), empty for untyped problems.
    /// Also part of the initial state, matching the reference behavior.
    typing: Vec<Literal>,
}

impl PlanningProblem {
    pub fn new(initial: &str, goals: &str, schemas: Vec<Action>) -> Result<Self, ParseError> {
        Ok(Self {
            initial: State::from_literals(parse_conjunction(initial)?),
            goals: parse_conjunction(goals)?,
            schemas,
            typing: Vec::new(),
        })
    }

    /// Build a typed problem. The typing facts are appended to the
    /// initial state so that plan starts establish them.
    pub fn with_typing(
        initial: &str,
        goals: &str,
        schemas: Vec<Action>,
        typing: &str,
    ) -> Result<Self, ParseError> {
        let typing = parse_conjunction(typing)?;
        let mut problem = Self::new(initial, goals, schemas)?;
        for fact in &typing {
            problem.initial.assert_fact(fact.clone());
        }
        problem.typing = typing;
        Ok(problem)
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn goals(&self) -> &[Literal] {
        &self.goals
    }

    pub fn schemas(&self) -> &[Action] {
        &self.schemas
    }

    pub fn typing(&self) -> &[Literal] {
        &self.typing
    }

    /// True iff every goal literal holds in the current state.
    pub fn goal_test(&self) -> bool {
        self.initial.satisfies_all(&self.goals)
    }

    /// True iff the problem has no negated literal in its goals or in
    /// any schema precondition.
    pub fn is_strips(&self) -> bool {
        self.goals.iter().all(|goal| !goal.negated)
            && self
                .schemas
                .iter()
                .all(|schema| schema.precond.iter().all(|pre| !pre.negated))
    }

    /// Execute one action call such as `Remove(Spare, Trunk)` against the
    /// current state, mutating it on success.
    pub fn act(&mut self, call: &Literal) -> Result<(), PlanningError> {
        let mut name_found = false;
        for schema in &self.schemas {
            if schema.name != call.predicate {
                continue;
            }
            name_found = true;
            let Some(bindings) = unify(&schema.head(), call) else {
                continue;
            };
            let Some(ground) = schema.ground(&bindings) else {
                continue;
            };
            self.initial = ground.apply(&self.initial)?;
            return Ok(());
        }
        if name_found {
            // The name exists but no schema instance matches this call.
            Err(PlanningError::UnknownAction(call.to_string()))
        } else {
            Err(PlanningError::UnknownAction(call.predicate.clone()))
        }
    }

    /// Enumerate every well-typed ground instantiation of every schema
    /// over the objects mentioned in the initial state. Argument
    /// permutations are without repetition; constant schema parameters
    /// filter the permutations through head unification.
    pub fn expand_actions(&self) -> Vec<Action> {
        let objects = constants_in(self.initial.iter());
        let filter_types = self.typing_filter_engaged();

        let mut expansions = Vec::new();
        for schema in &self.schemas {
            for permutation in objects.iter().permutations(schema.params.len()) {
                let target = Literal::positive(
                    schema.name.clone(),
                    permutation.into_iter().cloned().collect(),
                );
                let Some(bindings) = unify(&schema.head(), &target) else {
                    continue;
                };
                if filter_types
                    && !schema.typing.is_empty()
                    && !schema
                        .typing
                        .iter()
                        .all(|t| self.initial.holds(&t.substitute(&bindings)))
                {
                    continue;
                }
                if let Some(ground) = schema.ground(&bindings) {
                    expansions.push(ground);
                }
            }
        }
        debug!(
            schemas = self.schemas.len(),
            objects = objects.len(),
            expansions = expansions.len(),
            "expanded ground actions"
        );
        expansions
    }

    /// Enumerate the ground fluents of the problem: every argument
    /// permutation of every fluent pattern appearing in the initial
    /// state, the goals or a positive schema effect, filtered by the
    /// typing knowledge base when one is present.
    pub fn expand_fluents(&self) -> Vec<Literal> {
        let objects = constants_in(self.initial.iter().chain(self.goals.iter()));

        // Distinct predicate patterns, first occurrence wins.
        let mut patterns: IndexMap<String, usize> = IndexMap::new();
        let sources = self
            .initial
            .iter()
            .chain(self.goals.iter())
            .chain(self.schemas.iter().flat_map(|s| s.effect.iter()));
        for literal in sources {
            if !literal.negated {
                patterns
                    .entry(literal.predicate.clone())
                    .or_insert(literal.arity());
            }
        }

        let mut expansions = Vec::new();
        for (predicate, arity) in &patterns {
            for permutation in objects.iter().permutations(*arity) {
                let fluent = Literal::positive(
                    predicate.clone(),
                    permutation.into_iter().cloned().collect(),
                );
                if self.typing.is_empty() || self.fluent_well_typed(&fluent) {
                    expansions.push(fluent);
                }
            }
        }
        debug!(fluents = expansions.len(), "expanded ground fluents");
        expansions
    }

    /// The typing filter only engages when every precondition-bearing
    /// schema carries a typing clause.
    fn typing_filter_engaged(&self) -> bool {
        !self.typing.is_empty()
            && self
                .schemas
                .iter()
                .filter(|schema| !schema.precond.is_empty())
                .all(|schema| !schema.typing.is_empty())
    }

    /// One-step backward check against the typing facts: a ground fluent
    /// is admissible if it is itself a typing fact, or some schema
    /// mentions a unifying fluent whose typing clause is satisfiable
    /// (existentially, for typing variables the fluent leaves unbound).
    fn fluent_well_typed(&self, fluent: &Literal) -> bool {
        if self.typing.contains(fluent) {
            return true;
        }
        for schema in &self.schemas {
            if schema.typing.is_empty() || schema.precond.is_empty() {
                continue;
            }
            let mentioned = schema
                .precond
                .iter()
                .chain(schema.effect.iter())
                .filter(|l| !l.negated && !schema.typing.contains(l));
            for pattern in mentioned {
                let Some(bindings) = unify(pattern, fluent) else {
                    continue;
                };
                let satisfied = schema.typing.iter().all(|t| {
                    let t = t.substitute(&bindings);
                    if t.is_ground() {
                        self.typing.contains(&t)
                    } else {
                        self.typing.iter().any(|fact| unify(&t, fact).is_some())
                    }
                });
                if satisfied {
                    return true;
                }
            }
        }
        false
    }
}

fn constants_in<'a>(literals: impl Iterator<Item = &'a Literal>) -> Vec<Term> {
    let mut objects: IndexSet<Term> = IndexSet::new();
    for literal in literals {
        for arg in &literal.args {
            if !arg.is_variable() {
                objects.insert(arg.clone());
            }
        }
    }
    objects.into_iter().collect()
}
