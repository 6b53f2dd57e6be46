//! Error taxonomy for planning and single-step execution.
//!
//! Every failure is local to one planning attempt; each attempt owns its
//! data, so no error here can corrupt another attempt's state.

use logic::Literal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// An action was executed whose precondition literals are not all
    /// present in the current fact state.
    #[error("preconditions of '{action}' are not satisfied")]
    PreconditionUnsatisfied { action: String },

    /// Execution was requested for an action name absent from the
    /// problem's schema library.
    #[error("action '{0}' not found")]
    UnknownAction(String),

    /// An open precondition has zero candidate establishers in the whole
    /// grounded universe. Fatal to the attempt; establisher choices are
    /// never revisited.
    #[error("no action can establish '{literal}'")]
    NoEstablishingAction { literal: Literal },

    /// Neither promotion nor demotion keeps the ordering graph acyclic.
    #[error("unable to resolve the threat of '{action}' against causal link [{link}]")]
    UnresolvableThreat { action: String, link: String },

    /// Search abandoned past the refinement-step bound. Explicitly not a
    /// proof of unsolvability.
    #[error("no solution found within {0} refinement steps")]
    StepBudgetExceeded(usize),

    /// The ordering graph broke an invariant that holds by construction:
    /// a vetted edge was refused, or topological layering found a
    /// non-empty residual with no frontier. Should be unreachable.
    #[error("ordering graph violated the acyclicity invariant")]
    MalformedGraph,
}
