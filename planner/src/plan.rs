//! Plan output: action arena ids, causal links and the emitted partial
//! order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Action;
use crate::error::PlanningError;
use crate::graph;

/// Index into a plan's action arena. Ids are assigned in insertion order;
/// 0 is always `Start` and 1 always `Finish`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ActionId(pub usize);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed justification: `producer` was chosen to establish
/// `literal` as a precondition of `consumer`. Once recorded, a causal
/// link persists for the remainder of planning and constrains every
/// later action addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalLink {
    pub producer: ActionId,
    pub literal: logic::Literal,
    pub consumer: ActionId,
}

/// The validated partial order a successful search emits: the grounded
/// actions, the ordering constraints between them, and the causal links
/// justifying every precondition.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub actions: Vec<Action>,
    pub constraints: Vec<(ActionId, ActionId)>,
    pub causal_links: Vec<CausalLink>,
    pub start: ActionId,
    pub finish: ActionId,
}

impl Plan {
    pub fn action(&self, id: ActionId) -> &Action {
        &self.actions[id.0]
    }

    /// Actions other than the `Start`/`Finish` sentinels.
    pub fn step_count(&self) -> usize {
        self.actions.len().saturating_sub(2)
    }

    /// Partition the actions into waves of mutually-unordered actions,
    /// in execution order: `Start`'s wave comes first, `Finish`'s last.
    /// Re-running on an unchanged plan yields the same partition.
    pub fn linearize(&self) -> Result<Vec<Vec<ActionId>>, PlanningError> {
        let nodes: Vec<ActionId> = (0..self.actions.len()).map(ActionId).collect();
        graph::layers(&nodes, self.constraints.iter().copied())
    }

    /// Flatten the wave partition into one ordering-consistent sequence
    /// of non-sentinel actions, suitable for step-by-step execution.
    pub fn steps(&self) -> Result<Vec<ActionId>, PlanningError> {
        Ok(self
            .linearize()?
            .into_iter()
            .flatten()
            .filter(|id| *id != self.start && *id != self.finish)
            .collect())
    }

    pub fn describe_link(&self, link: &CausalLink) -> String {
        format!(
            "{} --{}--> {}",
            self.action(link.producer),
            link.literal,
            self.action(link.consumer)
        )
    }

    pub fn describe_constraint(&self, constraint: (ActionId, ActionId)) -> String {
        format!(
            "{} < {}",
            self.action(constraint.0),
            self.action(constraint.1)
        )
    }
}
