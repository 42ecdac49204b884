//! Transition execution and the per-object facade.
//!
//! This module is the imperative shell around the declared rules: it calls
//! guards, actions and concluders, unwinds on failure, and commits the new
//! state onto the subject.
//!
//! # Key Concepts
//!
//! - **Actions**: a single side effect that may veto a transition
//! - **Concluders**: ordered steps with compensating rollbacks
//! - **Transition**: one attempt, run in soft or hard mode
//! - **State Machine**: resolves definitions and events for one subject

mod action;
mod machine;
mod transition;

pub use action::{
    Action, Concluder, FnAction, FnConcluder, NoopAction, Persist, RollbackError, SAVE_METHOD,
};
pub use machine::StateMachine;
pub use transition::{Transition, TransitionError};
