//! The partial-order plan-space search engine.
//!
//! Planning is a refinement of partially ordered plans rather than a
//! search through state space. The engine owns the growing action set,
//! the ordering constraints, the causal links and the agenda of open
//! preconditions, and drains the agenda one refinement step at a time:
//! pick the most constrained open precondition, commit an establishing
//! action (reusing a plan action before instantiating a fresh grounding),
//! record the causal link, and resolve every threat this raises by
//! promotion or demotion. Ordering edges only ever enter through the
//! acyclicity gate of [`OrderingGraph`], so the partial order stays
//! consistent at every intermediate state.
//!
//! The search is synchronous and single-owner: one engine instance per
//! planning attempt, no shared state between attempts.
//!
//! The reference algorithm leaves several choice points to unordered set
//! iteration. This engine fixes them to a documented total order:
//!
//! - agenda ties (equal candidate counts) go to the most recently added
//!   open precondition;
//! - candidate lists put in-plan actions (in arena order) before fresh
//!   ground instances (in grounding-enumeration order);
//! - in-plan candidates whose producer-before-consumer edge the
//!   acyclicity gate would refuse are not candidates at all;
//! - fresh instances identical to an in-plan action are dropped;
//! - threats are demoted (after the consumer) before being promoted
//!   (before the producer).
//!
//! Establisher choices are never revisited; a dead end is reported, not
//! backtracked over. Every causal link carries its producer-before-
//! consumer ordering edge, inserted through the gate before the link is
//! recorded.

use logic::Literal;
use tracing::{debug, info, trace};

use crate::action::Action;
use crate::error::PlanningError;
use crate::graph::OrderingGraph;
use crate::plan::{ActionId, CausalLink, Plan};
use crate::problem::PlanningProblem;

/// Arena id of the `Start` sentinel (effects: the initial facts).
pub const START: ActionId = ActionId(0);
/// Arena id of the `Finish` sentinel (preconditions: the goal literals).
pub const FINISH: ActionId = ActionId(1);

/// Reference refinement-step bound; exceeding it means "no solution
/// found", never "unsolvable".
pub const DEFAULT_STEP_BUDGET: usize = 200;

/// Result of one successful refinement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One open precondition was discharged; more remain.
    Refined,
    /// The agenda is empty: the partial order is a solution.
    Solved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AgendaItem {
    literal: Literal,
    consumer: ActionId,
}

/// An establishing-action candidate, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    /// Reuse an action already in the plan.
    InPlan(ActionId),
    /// Instantiate a grounded universe entry (index into the universe).
    Fresh(usize),
}

pub struct PartialOrderPlanner {
    /// Action arena; 0 is `Start`, 1 is `Finish`, never removed.
    actions: Vec<Action>,
    ordering: OrderingGraph,
    links: Vec<CausalLink>,
    agenda: Vec<AgendaItem>,
    /// Grounded schema instances supplied by the problem, in enumeration
    /// order.
    universe: Vec<Action>,
    steps_taken: usize,
    budget: usize,
}

impl PartialOrderPlanner {
    pub fn new(problem: &PlanningProblem) -> Self {
        let start = Action::new(
            "Start",
            vec![],
            vec![],
            problem.initial().iter().cloned().collect(),
        );
        let finish = Action::new("Finish", vec![], problem.goals().to_vec(), vec![]);

        let mut ordering = OrderingGraph::new(START, FINISH);
        ordering.insert(START, FINISH);

        let agenda = problem
            .goals()
            .iter()
            .map(|goal| AgendaItem {
                literal: goal.clone(),
                consumer: FINISH,
            })
            .collect();

        Self {
            actions: vec![start, finish],
            ordering,
            links: Vec::new(),
            agenda,
            universe: problem.expand_actions(),
            steps_taken: 0,
            budget: DEFAULT_STEP_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn is_solved(&self) -> bool {
        self.agenda.is_empty()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn ordering(&self) -> &OrderingGraph {
        &self.ordering
    }

    pub fn causal_links(&self) -> &[CausalLink] {
        &self.links
    }

    /// Snapshot of the current partial order.
    pub fn plan(&self) -> Plan {
        Plan {
            actions: self.actions.clone(),
            constraints: self.ordering.edges().collect(),
            causal_links: self.links.clone(),
            start: START,
            finish: FINISH,
        }
    }

    /// Drive refinement until the agenda empties or the attempt fails.
    pub fn run(&mut self) -> Result<Plan, PlanningError> {
        loop {
            match self.step()? {
                StepOutcome::Solved => {
                    info!(
                        steps = self.steps_taken,
                        actions = self.actions.len() - 2,
                        links = self.links.len(),
                        "plan found"
                    );
                    return Ok(self.plan());
                }
                StepOutcome::Refined => {}
            }
        }
    }

    /// One refinement step: resolve a single open precondition. The
    /// budget is checked here, between steps, never mid-step.
    pub fn step(&mut self) -> Result<StepOutcome, PlanningError> {
        if self.agenda.is_empty() {
            return Ok(StepOutcome::Solved);
        }
        if self.steps_taken >= self.budget {
            return Err(PlanningError::StepBudgetExceeded(self.budget));
        }

        let (index, candidates) = self.select_open_precondition()?;
        let item = self.agenda.remove(index);
        debug!(
            subgoal = %item.literal,
            consumer = %self.actions[item.consumer.0],
            candidates = candidates.len(),
            "resolving open precondition"
        );

        let act0 = self.commit(candidates[0]);
        if act0 != START {
            // Cannot fail: no edge ever targets Start, so nothing in the
            // graph reaches back to it.
            self.ordering.insert(START, act0);
        }

        // A causal link implies its ordering edge, so the edge goes in
        // before the link is recorded and before any threat resolution
        // can constrain it. Selection vetted the edge via can_insert;
        // a refusal here means the gate invariant broke.
        if !self.ordering.insert(act0, item.consumer) {
            return Err(PlanningError::MalformedGraph);
        }

        let link = CausalLink {
            producer: act0,
            literal: item.literal,
            consumer: item.consumer,
        };
        if !self.links.contains(&link) {
            self.links.push(link.clone());
        }

        // The newcomer must not break any committed justification.
        for i in 0..self.links.len() {
            let committed = self.links[i].clone();
            self.protect(&committed, act0)?;
        }

        // And the new justification must survive every committed action.
        for id in 0..self.actions.len() {
            self.protect(&link, ActionId(id))?;
        }

        let preconds = self.actions[act0.0].precond.clone();
        for precond in preconds {
            self.enqueue(precond, act0);
        }

        self.steps_taken += 1;
        Ok(if self.agenda.is_empty() {
            StepOutcome::Solved
        } else {
            StepOutcome::Refined
        })
    }

    /// Most-constrained-first selection: the agenda item with the fewest
    /// establishing candidates, ties to the most recently added. An item
    /// with zero candidates anywhere in the universe is fatal.
    fn select_open_precondition(&self) -> Result<(usize, Vec<Candidate>), PlanningError> {
        let mut best_index = 0;
        let mut best_candidates = self.candidates_for(&self.agenda[0])?;
        for index in 1..self.agenda.len() {
            let candidates = self.candidates_for(&self.agenda[index])?;
            if candidates.len() <= best_candidates.len() {
                best_index = index;
                best_candidates = candidates;
            }
        }
        Ok((best_index, best_candidates))
    }

    fn candidates_for(&self, item: &AgendaItem) -> Result<Vec<Candidate>, PlanningError> {
        let mut candidates = Vec::new();
        for (id, action) in self.actions.iter().enumerate() {
            let id = ActionId(id);
            // An in-plan producer is only viable if the ordering gate
            // would accept its producer-before-consumer edge.
            if action.effect.contains(&item.literal)
                && self.ordering.can_insert(id, item.consumer)
            {
                candidates.push(Candidate::InPlan(id));
            }
        }
        for (index, action) in self.universe.iter().enumerate() {
            // A fresh instance enters the graph with no edges, so its
            // establishment edge is always insertable.
            if action.effect.contains(&item.literal) && !self.in_plan(action) {
                candidates.push(Candidate::Fresh(index));
            }
        }
        if candidates.is_empty() {
            return Err(PlanningError::NoEstablishingAction {
                literal: item.literal.clone(),
            });
        }
        Ok(candidates)
    }

    fn in_plan(&self, action: &Action) -> bool {
        self.actions
            .iter()
            .any(|a| a.name == action.name && a.params == action.params)
    }

    fn commit(&mut self, candidate: Candidate) -> ActionId {
        match candidate {
            Candidate::InPlan(id) => id,
            Candidate::Fresh(index) => {
                let action = self.universe[index].clone();
                trace!(action = %action, "introducing fresh action");
                self.actions.push(action);
                ActionId(self.actions.len() - 1)
            }
        }
    }

    /// Put an open precondition on the agenda unless it is already
    /// pending or already justified by a causal link (a reused action's
    /// discharged preconditions stay discharged).
    fn enqueue(&mut self, literal: Literal, consumer: ActionId) {
        let justified = self
            .links
            .iter()
            .any(|link| link.consumer == consumer && link.literal == literal);
        if justified {
            return;
        }
        let pending = self
            .agenda
            .iter()
            .any(|item| item.consumer == consumer && item.literal == literal);
        if pending {
            return;
        }
        self.agenda.push(AgendaItem { literal, consumer });
    }

    /// Threat check and resolution. `action` threatens `link` when one of
    /// its effects is the complement of the protected literal and it is
    /// neither endpoint. Demotion (order it after the consumer) is tried
    /// first: it keeps the producer's effects available for later reuse,
    /// where promotion wedges the threat in front of the producer and
    /// tends to strand still-open preconditions. Promotion is the
    /// fallback; if neither edge survives the acyclicity gate the
    /// attempt fails.
    fn protect(&mut self, link: &CausalLink, action: ActionId) -> Result<(), PlanningError> {
        if action == link.producer || action == link.consumer {
            return Ok(());
        }
        let threatens = self.actions[action.0]
            .effect
            .iter()
            .any(|effect| effect.is_complement_of(&link.literal));
        if !threatens {
            return Ok(());
        }

        if self.ordering.insert(link.consumer, action) {
            trace!(
                action = %self.actions[action.0],
                literal = %link.literal,
                "threat resolved by demotion"
            );
            return Ok(());
        }
        if self.ordering.insert(action, link.producer) {
            trace!(
                action = %self.actions[action.0],
                literal = %link.literal,
                "threat resolved by promotion"
            );
            return Ok(());
        }

        Err(PlanningError::UnresolvableThreat {
            action: self.actions[action.0].to_string(),
            link: format!(
                "{} --{}--> {}",
                self.actions[link.producer.0], link.literal, self.actions[link.consumer.0]
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_seeds_sentinels_and_agenda() {
        let problem = domains::simple_blocks_world().unwrap();
        let planner = PartialOrderPlanner::new(&problem);

        assert_eq!(planner.actions().len(), 2);
        assert_eq!(planner.actions()[START.0].name, "Start");
        assert_eq!(planner.actions()[FINISH.0].name, "Finish");
        assert!(planner.ordering().contains(START, FINISH));
        assert_eq!(planner.agenda.len(), 2);
        assert!(!planner.is_solved());
    }

    #[test]
    fn test_start_effects_are_initial_facts() {
        let problem = domains::simple_blocks_world().unwrap();
        let planner = PartialOrderPlanner::new(&problem);
        let start = &planner.actions()[START.0];

        assert!(start.precond.is_empty());
        assert_eq!(start.effect.len(), problem.initial().len());
        let finish = &planner.actions()[FINISH.0];
        assert!(finish.effect.is_empty());
        assert_eq!(finish.precond, problem.goals());
    }

    #[test]
    fn test_step_discharges_one_precondition() {
        let problem = domains::socks_and_shoes().unwrap();
        let mut planner = PartialOrderPlanner::new(&problem);

        let outcome = planner.step().unwrap();
        assert_eq!(outcome, StepOutcome::Refined);
        assert_eq!(planner.steps_taken(), 1);
        assert_eq!(planner.causal_links().len(), 1);
        assert_eq!(planner.actions().len(), 3);
    }

    #[test]
    fn test_reused_action_keeps_discharged_preconditions() {
        let problem = domains::simple_blocks_world().unwrap();
        let mut planner = PartialOrderPlanner::new(&problem);
        let mut solved = false;
        while !solved {
            solved = planner.step().unwrap() == StepOutcome::Solved;
            // No agenda item may duplicate a committed justification.
            for item in &planner.agenda {
                assert!(!planner
                    .links
                    .iter()
                    .any(|l| l.consumer == item.consumer && l.literal == item.literal));
            }
        }
    }
}
