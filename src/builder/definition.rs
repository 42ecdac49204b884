//! Declared transition rules.

use crate::core::{Guard, Params, State};
use crate::effects::{Action, Concluder};
use std::sync::Arc;

/// A guard together with the options it was configured with.
pub struct GuardSlot<T> {
    pub guard: Arc<dyn Guard<T>>,
    pub options: Params,
}

impl<T> GuardSlot<T> {
    /// Configuration options overlaid with the call params.
    pub fn params_for(&self, params: &Params) -> Params {
        if self.options.is_empty() {
            return params.clone();
        }
        let mut merged = self.options.clone();
        for (key, value) in params {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<T> Clone for GuardSlot<T> {
    fn clone(&self) -> Self {
        Self {
            guard: Arc::clone(&self.guard),
            options: self.options.clone(),
        }
    }
}

/// Rule for moving into `end_state`, shared by every start state it was
/// declared for.
pub struct TransitionDefinition<T> {
    pub(crate) end_state: State,
    pub(crate) guards: Vec<GuardSlot<T>>,
    pub(crate) concluders: Vec<Arc<dyn Concluder<T>>>,
    pub(crate) action: Option<Arc<dyn Action<T>>>,
    pub(crate) required_params: Vec<String>,
    pub(crate) blocked_message: Option<String>,
}

impl<T> TransitionDefinition<T> {
    pub(crate) fn new(end_state: State) -> Self {
        Self {
            end_state,
            guards: Vec::new(),
            concluders: Vec::new(),
            action: None,
            required_params: Vec::new(),
            blocked_message: None,
        }
    }

    pub fn end_state(&self) -> &State {
        &self.end_state
    }

    pub fn guards(&self) -> &[GuardSlot<T>] {
        &self.guards
    }

    pub fn concluders(&self) -> &[Arc<dyn Concluder<T>>] {
        &self.concluders
    }

    pub fn action(&self) -> Option<&Arc<dyn Action<T>>> {
        self.action.as_ref()
    }

    /// Parameter keys in declaration order, without duplicates.
    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    pub fn blocked_message(&self) -> Option<&str> {
        self.blocked_message.as_deref()
    }

    /// Whether every guard would pass for `subject`. Never touches the
    /// subject.
    pub fn would_allow(&self, subject: &T, params: &Params) -> bool {
        self.guards.iter().all(|slot| {
            slot.guard
                .would_allow(subject, &self.end_state, &slot.params_for(params))
        })
    }

    pub(crate) fn add_required_param(&mut self, key: &str) {
        if !self.required_params.iter().any(|k| k == key) {
            self.required_params.push(key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Predicate;
    use crate::test_support::Record;
    use serde_json::json;

    #[test]
    fn required_params_are_deduplicated_in_order() {
        let mut definition = TransitionDefinition::<Record>::new(State::new("paid"));
        definition.add_required_param("amount");
        definition.add_required_param("currency");
        definition.add_required_param("amount");

        assert_eq!(definition.required_params(), ["amount", "currency"]);
    }

    #[test]
    fn call_params_override_guard_options() {
        let mut options = Params::new();
        options.insert("limit".into(), json!(5));
        options.insert("strict".into(), json!(true));
        let slot = GuardSlot::<Record> {
            guard: Arc::new(Predicate::new(|_: &Record, _: &State, _: &Params| true)),
            options,
        };

        let mut params = Params::new();
        params.insert("limit".into(), json!(9));
        let merged = slot.params_for(&params);

        assert_eq!(merged.get("limit"), Some(&json!(9)));
        assert_eq!(merged.get("strict"), Some(&json!(true)));
    }
}
