//! First-order terms, literals, bindings, unification and fact states.
//! The planner crate builds on these; nothing here knows about plans.

pub mod literal;
pub mod parser;
pub mod state;
pub mod term;
pub mod unify;

pub use literal::Literal;
pub use parser::{parse_conjunction, parse_literal, ParseError};
pub use state::State;
pub use term::{Bindings, Term};
pub use unify::{unify, unify_with};
