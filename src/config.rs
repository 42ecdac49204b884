//! Engine-wide configuration.

use crate::builder::BuildError;
use crate::core::{State, NIL_STATE};
use serde::{Deserialize, Serialize};

/// Default name of the subject attribute holding the state.
pub const DEFAULT_STATE_ATTRIBUTE: &str = "state";

/// Flags shared by every state machine built over a registry.
///
/// # Example
///
/// ```rust
/// use statecraft::config::EngineConfig;
/// use statecraft::core::State;
///
/// let config = EngineConfig::from_json(r#"{
///     "state_attribute": "status",
///     "initial_state": "draft",
///     "force_hard_mode": true
/// }"#).unwrap();
///
/// assert_eq!(config.state_attribute, "status");
/// assert_eq!(config.initial_state, State::new("draft"));
/// assert!(!config.store_states_as_strings);
/// assert!(config.force_hard_mode);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Subject attribute read and written as the state
    pub state_attribute: String,
    /// Persist the state's string form instead of the identifier
    pub store_states_as_strings: bool,
    /// State reported while the attribute is unset
    pub initial_state: State,
    /// Treat every transition and event as hard
    pub force_hard_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_attribute: DEFAULT_STATE_ATTRIBUTE.to_string(),
            store_states_as_strings: false,
            initial_state: NIL_STATE,
            force_hard_mode: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(raw)?)
    }
}
