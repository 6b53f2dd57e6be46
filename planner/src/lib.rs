//! Partial-order planning over a STRIPS-style action model.
//!
//! The crate splits into a problem layer and a search layer. The problem
//! layer ([`action`], [`problem`], [`domains`]) defines action schemas in
//! a textual notation, grounds them over a problem's objects and offers
//! direct state-space execution for validation. The search layer
//! ([`engine`], [`graph`], [`plan`]) performs plan-space search: it
//! refines a partially ordered plan by discharging open preconditions
//! through causal links, keeping the ordering constraints acyclic at
//! every step and resolving threats by promotion or demotion.
//!
//! ```no_run
//! use planner::{domains, PartialOrderPlanner};
//!
//! let problem = domains::socks_and_shoes()?;
//! let plan = PartialOrderPlanner::new(&problem).run()?;
//! for wave in plan.linearize()? {
//!     println!("{wave:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod action;
pub mod config;
pub mod domains;
pub mod engine;
pub mod error;
pub mod graph;
pub mod plan;
pub mod problem;

pub use action::Action;
pub use config::{ConfigError, PlannerConfig};
pub use engine::{PartialOrderPlanner, StepOutcome, DEFAULT_STEP_BUDGET, FINISH, START};
pub use error::PlanningError;
pub use graph::OrderingGraph;
pub use plan::{ActionId, CausalLink, Plan};
pub use problem::PlanningProblem;
