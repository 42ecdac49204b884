//! Per-transition configuration applied at declaration time.

use crate::builder::definition::{GuardSlot, TransitionDefinition};
use crate::core::{Guard, Params, State, Subject};
use crate::effects::{Action, Concluder, FnConcluder, Persist};
use std::sync::Arc;

/// Fluent configuration for one or more transition definitions.
///
/// Guards and concluders are appended to whatever a definition already
/// carries; the action and the blocked message replace earlier values.
pub struct TransitionConfig<T> {
    guards: Vec<GuardSlot<T>>,
    concluders: Vec<Arc<dyn Concluder<T>>>,
    action: Option<Arc<dyn Action<T>>>,
    required: Vec<String>,
    blocked: Option<String>,
}

impl<T: 'static> TransitionConfig<T> {
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            concluders: Vec::new(),
            action: None,
            required: Vec::new(),
            blocked: None,
        }
    }

    /// Add a guard.
    pub fn guard<G>(self, guard: G) -> Self
    where
        G: Guard<T> + 'static,
    {
        self.guard_with(guard, Params::new())
    }

    /// Add a guard with configuration options. Call params take precedence
    /// over the options when both name the same key.
    pub fn guard_with<G>(mut self, guard: G, options: Params) -> Self
    where
        G: Guard<T> + 'static,
    {
        self.guards.push(GuardSlot {
            guard: Arc::new(guard),
            options,
        });
        self
    }

    /// Set the action (at most one per definition).
    pub fn action<A>(mut self, action: A) -> Self
    where
        A: Action<T> + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Append a concluder.
    pub fn concluder<C>(mut self, concluder: C) -> Self
    where
        C: Concluder<T> + 'static,
    {
        self.concluders.push(Arc::new(concluder));
        self
    }

    /// Append a custom persistence finalizer. It has no rollback; see
    /// [`TransitionConfig::persist`] for the default one.
    pub fn persist_with<F>(self, persist: F) -> Self
    where
        F: Fn(&mut T, &State) -> bool + Send + Sync + 'static,
    {
        self.concluder(FnConcluder::new(move |subject: &mut T, to: &State, _: &Params| {
            persist(subject, to)
        }))
    }

    /// Require the given parameter keys on every call.
    pub fn require<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.required.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Message recorded when an event using this definition cannot fire
    /// from the current state.
    pub fn blocked(mut self, message: impl Into<String>) -> Self {
        self.blocked = Some(message.into());
        self
    }

    pub(crate) fn apply(&self, definition: &mut TransitionDefinition<T>) {
        definition.guards.extend(self.guards.iter().cloned());
        definition
            .concluders
            .extend(self.concluders.iter().map(Arc::clone));
        if let Some(action) = &self.action {
            definition.action = Some(Arc::clone(action));
        }
        for key in &self.required {
            definition.add_required_param(key);
        }
        if let Some(message) = &self.blocked {
            definition.blocked_message = Some(message.clone());
        }
    }
}

impl<T: Subject + 'static> TransitionConfig<T> {
    /// Append the default persistence finalizer, [`Persist`].
    pub fn persist(self) -> Self {
        self.concluder(Persist)
    }
}

impl<T: 'static> Default for TransitionConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Predicate, StoredState};
    use crate::effects::{FnAction, StateMachine};
    use crate::test_support::Record;

    fn always(_: &Record, _: &State, _: &Params) -> bool {
        true
    }

    #[test]
    fn apply_appends_guards_and_concluders() {
        let config = TransitionConfig::<Record>::new()
            .guard(Predicate::new(always))
            .concluder(FnConcluder::new(|_: &mut Record, _: &State, _: &Params| true))
            .persist_with(|_: &mut Record, _: &State| true);

        let mut definition = TransitionDefinition::new(State::new("b"));
        config.apply(&mut definition);
        config.apply(&mut definition);

        assert_eq!(definition.guards().len(), 2);
        assert_eq!(definition.concluders().len(), 4);
        assert!(definition.action().is_none());
    }

    #[test]
    fn apply_replaces_action_and_blocked_message() {
        let mut definition = TransitionDefinition::new(State::new("b"));

        TransitionConfig::<Record>::new()
            .action(FnAction::new(|_: &mut Record, _: &State| true))
            .blocked("first")
            .apply(&mut definition);
        TransitionConfig::<Record>::new()
            .blocked("second")
            .apply(&mut definition);

        assert!(definition.action().is_some());
        assert_eq!(definition.blocked_message(), Some("second"));
    }

    #[test]
    fn persist_saves_again_when_a_later_concluder_fails() {
        let mut registry = crate::builder::Registry::<Record>::new();
        registry
            .declare(("a", "b"), None, Some(TransitionConfig::new().persist()))
            .unwrap();
        registry
            .declare(
                ("b", "c"),
                None,
                Some(
                    TransitionConfig::new()
                        .persist()
                        .concluder(FnConcluder::new(|_: &mut Record, _: &State, _: &Params| false)),
                ),
            )
            .unwrap();
        let mut record = Record::at("a");

        let mut machine = StateMachine::new(&registry, &mut record);
        assert!(machine.transition("b", &Params::new()).unwrap());
        assert!(!machine.transition("c", &Params::new()).unwrap());

        assert_eq!(record.journal, ["save", "save", "save"]);
        assert_eq!(record.state, Some(StoredState::Symbol(State::new("b"))));
    }

    #[test]
    fn require_accumulates_keys() {
        let mut definition = TransitionDefinition::new(State::new("b"));
        TransitionConfig::<Record>::new()
            .require(["amount"])
            .require(vec!["currency".to_string(), "amount".to_string()])
            .apply(&mut definition);

        assert_eq!(definition.required_params(), ["amount", "currency"]);
    }
}
