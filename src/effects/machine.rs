//! Per-object state facade.

use crate::builder::Registry;
use crate::config::EngineConfig;
use crate::core::{Mode, Params, State, StateTransition, StoredState, Subject};
use crate::effects::transition::{Transition, TransitionError};
use serde_json::Value;

/// Wraps one subject and resolves transitions against a registry.
///
/// The machine holds no state of its own: the current state always lives
/// in the subject's configured attribute.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{Mapping, Registry};
/// use statecraft::core::{Params, State, StoredState, Subject};
/// use statecraft::effects::StateMachine;
///
/// #[derive(Default)]
/// struct Door {
///     state: Option<StoredState>,
///     errors: Vec<String>,
/// }
///
/// impl Subject for Door {
///     fn read_attribute(&self, _: &str) -> Option<StoredState> {
///         self.state.clone()
///     }
///     fn write_attribute(&mut self, _: &str, value: StoredState) {
///         self.state = Some(value);
///     }
///     fn failure_messages(&self) -> &[String] {
///         &self.errors
///     }
///     fn push_failure_message(&mut self, message: String) {
///         self.errors.push(message);
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.set_initial_state("closed");
/// registry.declare(("closed", "open"), Some("open"), None).unwrap();
/// registry.declare(("open", "closed"), Some("close"), None).unwrap();
///
/// let mut door = Door::default();
/// let mut machine = StateMachine::new(&registry, &mut door);
///
/// assert!(machine.can_transition("open"));
/// assert!(machine.fire("open", &Params::new()).unwrap());
/// assert_eq!(machine.state(), State::new("open"));
/// assert!(!machine.fire("open", &Params::new()).unwrap());
/// ```
pub struct StateMachine<'r, 's, T> {
    registry: &'r Registry<T>,
    subject: &'s mut T,
}

impl<'r, 's, T: Subject + 'static> StateMachine<'r, 's, T> {
    pub fn new(registry: &'r Registry<T>, subject: &'s mut T) -> Self {
        Self { registry, subject }
    }

    pub fn subject(&self) -> &T {
        &*self.subject
    }

    pub fn subject_mut(&mut self) -> &mut T {
        &mut *self.subject
    }

    pub fn config(&self) -> &'r EngineConfig {
        self.registry.config()
    }

    /// Current state; the configured initial state while the attribute is
    /// unset.
    pub fn state(&self) -> State {
        let config = self.config();
        self.subject
            .read_attribute(&config.state_attribute)
            .map(|stored| stored.to_state())
            .unwrap_or_else(|| config.initial_state.clone())
    }

    /// Write `state` onto the subject, as a string when so configured.
    pub fn set_state(&mut self, state: impl Into<State>) {
        let config = self.config();
        let stored = StoredState::encode(&state.into(), config.store_states_as_strings);
        self.subject.write_attribute(&config.state_attribute, stored);
    }

    pub fn is_in(&self, state: impl Into<State>) -> bool {
        self.state() == state.into()
    }

    /// Whether a path to `target` is declared from the current state.
    /// Guards are not consulted.
    pub fn can_transition(&self, target: impl Into<State>) -> bool {
        self.registry
            .find(&self.state(), &target.into())
            .is_some()
    }

    pub fn failure_messages(&self) -> &[String] {
        self.subject.failure_messages()
    }

    /// Soft transition to `target`.
    pub fn transition(
        &mut self,
        target: impl Into<State>,
        params: &Params,
    ) -> Result<bool, TransitionError> {
        self.transition_with(target, params, Mode::Soft)
    }

    /// Hard transition to `target`: unreachable targets, guard rejections
    /// and concluder failures are raised. An action veto still yields
    /// `Ok(false)`.
    pub fn transition_hard(
        &mut self,
        target: impl Into<State>,
        params: &Params,
    ) -> Result<bool, TransitionError> {
        self.transition_with(target, params, Mode::Hard)
    }

    pub fn transition_with(
        &mut self,
        target: impl Into<State>,
        params: &Params,
        mode: Mode,
    ) -> Result<bool, TransitionError> {
        self.run(target.into(), params, mode, None)
    }

    /// Non-mutating check of the guards on the applicable definition.
    pub fn will_allow(
        &self,
        target: impl Into<State>,
        params: &Params,
    ) -> Result<bool, TransitionError> {
        let target = target.into();
        if !self.registry.find_any_target(&target) {
            return Err(TransitionError::UnknownState { state: target });
        }
        Ok(self
            .registry
            .find(&self.state(), &target)
            .is_some_and(|definition| definition.would_allow(self.subject(), params)))
    }

    /// Fire the event `alias` in soft mode.
    pub fn fire(&mut self, alias: &str, params: &Params) -> Result<bool, TransitionError> {
        self.fire_with(alias, params, Mode::Soft)
    }

    /// Fire the event `alias` in hard mode.
    pub fn fire_hard(&mut self, alias: &str, params: &Params) -> Result<bool, TransitionError> {
        self.fire_with(alias, params, Mode::Hard)
    }

    /// Fire the first candidate of `alias` whose start matches the current
    /// state. With no match, soft mode records the alias's blocked messages
    /// on the subject and hard mode raises `InvalidTransition`.
    pub fn fire_with(
        &mut self,
        alias: &str,
        params: &Params,
        mode: Mode,
    ) -> Result<bool, TransitionError> {
        let registry = self.registry;
        if !registry.has_event(alias) {
            return Err(TransitionError::NoSuchMethod {
                name: alias.to_string(),
            });
        }

        let mode = mode.escalate(registry.config().force_hard_mode);
        let current = self.state();
        match registry.resolve_event(alias, &current) {
            Some((_, end)) => self.run(end.clone(), params, mode, Some(alias)),
            None if mode.is_hard() => Err(TransitionError::InvalidTransition {
                from: current,
                via: alias.to_string(),
            }),
            None => {
                tracing::debug!(event = alias, from = %current, "event blocked");
                for message in registry.blocked_messages(alias) {
                    self.subject.push_failure_message(message.to_string());
                }
                Ok(false)
            }
        }
    }

    /// Resolve a call by name.
    ///
    /// Recognized names are `state`, `failure_messages`, event aliases
    /// (`<alias>` soft, `<alias>!` hard) and state predicates (`<state>?`).
    /// Everything else is forwarded to [`Subject::respond`].
    pub fn dispatch(&mut self, method: &str, params: &Params) -> Result<Value, TransitionError> {
        let registry = self.registry;
        match method {
            "state" => return Ok(state_value(&self.state())),
            "failure_messages" => return Ok(Value::from(self.failure_messages().to_vec())),
            _ => {}
        }

        if let Some(alias) = method.strip_suffix('!') {
            if registry.has_event(alias) {
                return self.fire_hard(alias, params).map(Value::Bool);
            }
        } else if let Some(name) = method.strip_suffix('?') {
            let state = State::new(name);
            if registry.is_known_state(&state) {
                return Ok(Value::Bool(self.state() == state));
            }
        } else if registry.has_event(method) {
            return self.fire(method, params).map(Value::Bool);
        }

        self.subject
            .respond(method, params)
            .ok_or_else(|| TransitionError::NoSuchMethod {
                name: method.to_string(),
            })
    }

    fn run(
        &mut self,
        target: State,
        params: &Params,
        mode: Mode,
        event: Option<&str>,
    ) -> Result<bool, TransitionError> {
        let registry = self.registry;
        let mode = mode.escalate(registry.config().force_hard_mode);
        if !registry.find_any_target(&target) {
            return Err(TransitionError::UnknownState { state: target });
        }

        let current = self.state();
        let Some(definition) = registry.find(&current, &target) else {
            tracing::debug!(from = %current, to = %target, "no transition declared");
            return match mode {
                Mode::Soft => Ok(false),
                Mode::Hard => Err(TransitionError::InvalidTransition {
                    from: current,
                    via: target.name().to_string(),
                }),
            };
        };

        let committed =
            Transition::new(&mut *self.subject, current.clone(), definition, mode).call(params)?;
        if committed {
            self.set_state(target.clone());
            tracing::debug!(from = %current, to = %target, ?mode, "transition committed");
            let record = StateTransition::new(current, target, event.map(str::to_string), mode);
            self.subject.after_transition(&record);
        }
        Ok(committed)
    }
}

fn state_value(state: &State) -> Value {
    match state {
        State::Nil => Value::Null,
        other => Value::String(other.name().to_string()),
    }
}
