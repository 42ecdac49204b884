//! State identifiers.
//!
//! A [`State`] is an opaque, symbol-like token naming a position in a
//! subject's lifecycle. Two reserved values exist next to user states:
//! [`ANY_STATE`], a wildcard accepted only as a start state, and
//! [`NIL_STATE`], the value read from a subject that has no state yet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a position in a subject's lifecycle.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, ANY_STATE, NIL_STATE};
///
/// let paid = State::new("paid");
/// assert_eq!(paid.name(), "paid");
/// assert_eq!(paid, State::from("paid"));
/// assert!(ANY_STATE.is_any());
/// assert!(NIL_STATE.is_nil());
/// assert_ne!(paid, NIL_STATE);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum State {
    /// A user-declared state.
    Named(String),
    /// Wildcard start state matching every current state.
    Any,
    /// No state assigned yet.
    Nil,
}

/// Wildcard start state.
pub const ANY_STATE: State = State::Any;

/// Sentinel for "no state yet assigned".
pub const NIL_STATE: State = State::Nil;

const ANY_NAME: &str = "*";

impl State {
    /// Create a named state.
    pub fn new(name: impl Into<String>) -> Self {
        State::Named(name.into())
    }

    /// Display name. Named states return their identifier, the wildcard
    /// returns `"*"` and the nil sentinel returns an empty string.
    pub fn name(&self) -> &str {
        match self {
            State::Named(name) => name,
            State::Any => ANY_NAME,
            State::Nil => "",
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, State::Any)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, State::Nil)
    }

    /// True for user states, false for the two reserved values.
    pub fn is_named(&self) -> bool {
        matches!(self, State::Named(_))
    }

    /// Whether a transition declared from `self` may start at `current`.
    pub fn accepts(&self, current: &State) -> bool {
        self.is_any() || self == current
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Named(name) => f.write_str(name),
            State::Any => f.write_str("<any>"),
            State::Nil => f.write_str("<nil>"),
        }
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        State::Named(name)
    }
}

impl From<&State> for State {
    fn from(state: &State) -> Self {
        state.clone()
    }
}

impl From<Option<String>> for State {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => State::Nil,
            Some(name) if name == ANY_NAME => State::Any,
            Some(name) => State::Named(name),
        }
    }
}

impl From<State> for Option<String> {
    fn from(state: State) -> Self {
        match state {
            State::Named(name) => Some(name),
            State::Any => Some(ANY_NAME.to_string()),
            State::Nil => None,
        }
    }
}

/// Raw value held in a subject's state attribute.
///
/// Subjects configured with `store_states_as_strings` hold [`StoredState::Text`];
/// otherwise the canonical identifier is stored as-is.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StoredState {
    Symbol(State),
    Text(String),
}

impl StoredState {
    /// Encode a state for storage.
    pub fn encode(state: &State, as_string: bool) -> Self {
        if as_string {
            StoredState::Text(state.name().to_string())
        } else {
            StoredState::Symbol(state.clone())
        }
    }

    /// Canonical identifier for the stored value.
    pub fn to_state(&self) -> State {
        match self {
            StoredState::Symbol(state) => state.clone(),
            StoredState::Text(text) if text.is_empty() => State::Nil,
            StoredState::Text(text) => State::new(text.as_str()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredState::Text(text) => Some(text),
            StoredState::Symbol(_) => None,
        }
    }
}
