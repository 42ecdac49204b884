//! Execution of a single transition attempt.
//!
//! A [`Transition`] runs the fixed protocol for one definition:
//! required params, guards, action, then concluders in declared order. A
//! failing concluder unwinds every concluder that already succeeded, newest
//! first, followed by the action. The subject's state attribute is never
//! written here; the caller commits the target state on `Ok(true)`.

use crate::builder::TransitionDefinition;
use crate::core::{Mode, Params, State, Subject};
use crate::effects::action::RollbackError;
use crate::enforcement::check_required;

/// Errors raised by transitions and the state machine facade.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Unknown state '{state}'")]
    UnknownState { state: State },

    #[error("No transition from '{from}' via '{via}'")]
    InvalidTransition { from: State, via: String },

    #[error("Guard rejected transition to '{to}': {}", messages.join(", "))]
    GuardFailed { to: State, messages: Vec<String> },

    #[error("Concluder failed for transition to '{to}': {}", messages.join(", "))]
    ConcluderFailed { to: State, messages: Vec<String> },

    #[error("Missing required params: {}", missing.join(", "))]
    MissingParams { missing: Vec<String> },

    #[error("No method '{name}'")]
    NoSuchMethod { name: String },

    #[error("Rollback failed: {0}")]
    Rollback(#[source] RollbackError),
}

/// One attempt to move `subject` into `target_state`.
pub struct Transition<'a, T> {
    subject: &'a mut T,
    previous_state: State,
    target_state: State,
    definition: &'a TransitionDefinition<T>,
    mode: Mode,
}

impl<'a, T: Subject> Transition<'a, T> {
    pub fn new(
        subject: &'a mut T,
        previous_state: State,
        definition: &'a TransitionDefinition<T>,
        mode: Mode,
    ) -> Self {
        Self {
            subject,
            previous_state,
            target_state: definition.end_state().clone(),
            definition,
            mode,
        }
    }

    pub fn previous_state(&self) -> &State {
        &self.previous_state
    }

    pub fn target_state(&self) -> &State {
        &self.target_state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run the protocol. Soft mode reports business failures as
    /// `Ok(false)`; hard mode raises them. Missing params and rollback
    /// errors are raised in both modes. An action veto is always `Ok(false)`.
    pub fn call(&mut self, params: &Params) -> Result<bool, TransitionError> {
        check_required(self.definition.required_params(), params)?;

        if !self.allowed(params) {
            tracing::debug!(
                from = %self.previous_state,
                to = %self.target_state,
                "guard rejected transition"
            );
            return self.fail(|to, messages| TransitionError::GuardFailed { to, messages });
        }

        let action = self.definition.action();
        if let Some(action) = action {
            if !action.call(self.subject, &self.target_state) {
                tracing::warn!(
                    from = %self.previous_state,
                    to = %self.target_state,
                    "action vetoed transition"
                );
                return Ok(false);
            }
        }

        let concluders = self.definition.concluders();
        for (position, concluder) in concluders.iter().enumerate() {
            if concluder.call(self.subject, &self.target_state, params) {
                continue;
            }

            tracing::warn!(
                to = %self.target_state,
                failed_at = position,
                "concluder failed, rolling back"
            );
            for done in concluders[..position].iter().rev() {
                done.rollback(self.subject, &self.target_state, params)
                    .map_err(TransitionError::Rollback)?;
            }
            if let Some(action) = action {
                action
                    .rollback(self.subject, &self.previous_state)
                    .map_err(TransitionError::Rollback)?;
            }
            return self.fail(|to, messages| TransitionError::ConcluderFailed { to, messages });
        }

        Ok(true)
    }

    /// Non-mutating guard check.
    pub fn will_allow(&self, params: &Params) -> bool {
        self.definition.would_allow(&*self.subject, params)
    }

    fn allowed(&mut self, params: &Params) -> bool {
        for slot in self.definition.guards() {
            let merged = slot.params_for(params);
            if !slot.guard.evaluate(self.subject, &self.target_state, &merged) {
                return false;
            }
        }
        true
    }

    fn fail<F>(&self, error: F) -> Result<bool, TransitionError>
    where
        F: FnOnce(State, Vec<String>) -> TransitionError,
    {
        match self.mode {
            Mode::Soft => Ok(false),
            Mode::Hard => Err(error(
                self.target_state.clone(),
                self.subject.failure_messages().to_vec(),
            )),
        }
    }
}
