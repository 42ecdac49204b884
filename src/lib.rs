//! Statecraft: declarative, guarded state transitions for domain objects
//!
//! A subject object carries a named state and may only move between states
//! through transitions declared up front. Each transition can be guarded,
//! can run a side-effecting action, and can finish with an ordered chain of
//! concluders that is unwound in reverse when any step fails. Transitions
//! run either softly (failures return `false` and leave reasons on the
//! subject) or hard (failures are raised as typed errors).
//!
//! # Core Concepts
//!
//! - **Registry**: declared `start -> end` rules and named events
//! - **Transition**: one guarded, rollback-safe attempt
//! - **State Machine**: per-object facade resolving calls against the registry
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::{Registry, TransitionConfig};
//! use statecraft::core::{Params, Predicate, State, StoredState, Subject};
//! use statecraft::effects::{StateMachine, TransitionError};
//! use statecraft::mapping;
//!
//! #[derive(Default)]
//! struct Order {
//!     state: Option<StoredState>,
//!     errors: Vec<String>,
//!     paid: bool,
//! }
//!
//! impl Subject for Order {
//!     fn read_attribute(&self, _: &str) -> Option<StoredState> {
//!         self.state.clone()
//!     }
//!     fn write_attribute(&mut self, _: &str, value: StoredState) {
//!         self.state = Some(value);
//!     }
//!     fn failure_messages(&self) -> &[String] {
//!         &self.errors
//!     }
//!     fn push_failure_message(&mut self, message: String) {
//!         self.errors.push(message);
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.set_initial_state("draft");
//! registry
//!     .declare(
//!         mapping! { draft => shipped },
//!         Some("ship"),
//!         Some(TransitionConfig::new().guard(
//!             Predicate::new(|o: &Order, _: &State, _: &Params| o.paid).with_message("unpaid"),
//!         )),
//!     )
//!     .unwrap();
//!
//! let mut order = Order::default();
//! let mut machine = StateMachine::new(&registry, &mut order);
//!
//! assert!(!machine.fire("ship", &Params::new()).unwrap());
//! assert!(matches!(
//!     machine.fire_hard("ship", &Params::new()),
//!     Err(TransitionError::GuardFailed { .. })
//! ));
//!
//! machine.subject_mut().paid = true;
//! assert!(machine.fire("ship", &Params::new()).unwrap());
//! assert_eq!(machine.state(), State::new("shipped"));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod enforcement;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use builder::{Mapping, Registry, TransitionConfig};
pub use config::EngineConfig;
pub use core::{Guard, Params, State, Subject, ANY_STATE, NIL_STATE};
pub use effects::{StateMachine, Transition, TransitionError};
