//! Committed transition records.
//!
//! The engine builds a [`StateTransition`] every time a new state is
//! committed and hands it to [`Subject::after_transition`](super::Subject::after_transition).
//! Subjects that want an audit trail can keep a [`StateHistory`].

use super::mode::Mode;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: State,
    /// The state being transitioned to
    pub to: State,
    /// Event alias that triggered the transition, if any
    pub event: Option<String>,
    pub mode: Mode,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    pub fn new(from: State, to: State, event: Option<String>, mode: Mode) -> Self {
        Self {
            from,
            to,
            event,
            mode,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of committed transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Mode, State, StateHistory, StateTransition};
///
/// let history = StateHistory::new()
///     .record(StateTransition::new(State::new("draft"), State::new("paid"), None, Mode::Soft))
///     .record(StateTransition::new(
///         State::new("paid"),
///         State::new("shipped"),
///         Some("ship".to_string()),
///         Mode::Hard,
///     ));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &State::new("shipped"));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&State> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NIL_STATE;

    fn step(from: &str, to: &str) -> StateTransition {
        StateTransition::new(State::new(from), State::new(to), None, Mode::Soft)
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_does_not_mutate_original() {
        let history = StateHistory::new();
        let recorded = history.record(step("a", "b"));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(recorded.transitions().len(), 1);
    }

    #[test]
    fn path_starts_at_first_source() {
        let history = StateHistory::new()
            .record(step("a", "b"))
            .record(step("b", "c"));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![&State::new("a"), &State::new("b"), &State::new("c")]
        );
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut first = step("a", "b");
        first.timestamp = Utc::now() - chrono::Duration::seconds(5);
        let history = StateHistory::new().record(first).record(step("b", "c"));

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_secs(4));
    }

    #[test]
    fn history_serializes() {
        let history = StateHistory::new().record(StateTransition::new(
            NIL_STATE,
            State::new("a"),
            Some("start".into()),
            Mode::Hard,
        ));
        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.transitions(), history.transitions());
    }
}
