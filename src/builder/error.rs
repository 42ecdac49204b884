//! Errors raised while declaring transitions or loading configuration.

use thiserror::Error;

/// Errors that can occur when configuring a registry.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition mapping is empty. Add at least one start -> end pair")]
    EmptyMapping,

    #[error("No start states given for end state '{end}'")]
    MissingStartStates { end: String },

    #[error("'{state}' cannot be used as an end state")]
    ReservedEndState { state: String },

    #[error("'{state}' cannot be used as a start state")]
    ReservedStartState { state: String },

    #[error("Event alias must not be empty")]
    EmptyAlias,

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
