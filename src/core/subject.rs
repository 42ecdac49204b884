//! The object a state machine wraps.

use super::history::StateTransition;
use super::state::StoredState;
use serde_json::Value;

/// Named call parameters passed through transitions and dynamic calls.
pub type Params = serde_json::Map<String, Value>;

/// Domain object carrying a state attribute and a failure-message list.
///
/// The subject owns all durable state. The engine reads and writes the
/// attribute named by the registry configuration (default `"state"`) and
/// only ever appends to the failure-message list.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Params, StoredState, Subject};
/// use serde_json::Value;
///
/// #[derive(Default)]
/// struct Ticket {
///     status: Option<StoredState>,
///     errors: Vec<String>,
///     assignee: String,
/// }
///
/// impl Subject for Ticket {
///     fn read_attribute(&self, name: &str) -> Option<StoredState> {
///         match name {
///             "status" => self.status.clone(),
///             _ => None,
///         }
///     }
///
///     fn write_attribute(&mut self, name: &str, value: StoredState) {
///         if name == "status" {
///             self.status = Some(value);
///         }
///     }
///
///     fn failure_messages(&self) -> &[String] {
///         &self.errors
///     }
///
///     fn push_failure_message(&mut self, message: String) {
///         self.errors.push(message);
///     }
///
///     fn respond(&mut self, method: &str, _params: &Params) -> Option<Value> {
///         match method {
///             "assignee" => Some(Value::String(self.assignee.clone())),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Subject {
    /// Read the attribute called `name`; `None` when unset.
    fn read_attribute(&self, name: &str) -> Option<StoredState>;

    /// Write the attribute called `name`.
    fn write_attribute(&mut self, name: &str, value: StoredState);

    /// Reasons accumulated by guards, actions and blocked events.
    fn failure_messages(&self) -> &[String];

    fn push_failure_message(&mut self, message: String);

    /// Handle a call the state machine does not recognize.
    ///
    /// Returns `None` when the subject does not respond to `method`.
    fn respond(&mut self, _method: &str, _params: &Params) -> Option<Value> {
        None
    }

    /// Invoked once the new state has been committed.
    fn after_transition(&mut self, _record: &StateTransition) {}
}
