//! Core types shared by the registry, the engine and the facade.
//!
//! - State identifiers and their stored form
//! - The subject contract and call parameters
//! - Guard predicates
//! - Committed transition history

mod guard;
mod history;
mod mode;
mod state;
mod subject;

pub use guard::{Guard, Predicate};
pub use history::{StateHistory, StateTransition};
pub use mode::Mode;
pub use state::{State, StoredState, ANY_STATE, NIL_STATE};
pub use subject::{Params, Subject};
