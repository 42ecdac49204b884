//! Table of declared transitions and event aliases.

use crate::builder::definition::TransitionDefinition;
use crate::builder::error::BuildError;
use crate::builder::mapping::Mapping;
use crate::builder::transition::TransitionConfig;
use crate::config::EngineConfig;
use crate::core::{State, ANY_STATE};
use std::collections::{HashMap, HashSet};

type Key = (State, State);

/// Declared transitions for one kind of subject.
///
/// Each `(start, end)` pair maps to exactly one [`TransitionDefinition`].
/// Pairs first declared together through a start-state list share a
/// definition; pairs declared earlier keep their own.
/// Event aliases map to ordered `(start, end)` candidates.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{Mapping, Registry};
/// use statecraft::core::{State, StoredState, Subject};
///
/// # #[derive(Default)]
/// # struct Order { state: Option<StoredState>, errors: Vec<String> }
/// # impl Subject for Order {
/// #     fn read_attribute(&self, _: &str) -> Option<StoredState> { self.state.clone() }
/// #     fn write_attribute(&mut self, _: &str, value: StoredState) { self.state = Some(value) }
/// #     fn failure_messages(&self) -> &[String] { &self.errors }
/// #     fn push_failure_message(&mut self, m: String) { self.errors.push(m) }
/// # }
/// let mut registry = Registry::<Order>::new();
/// registry
///     .declare(Mapping::new().pair(["draft", "pending"], "paid"), Some("pay"), None)
///     .unwrap();
/// registry.declare(("paid", "shipped"), None, None).unwrap();
///
/// let names: Vec<&str> = registry.states().iter().map(|s| s.name()).collect();
/// assert_eq!(names, ["draft", "paid", "pending", "shipped"]);
/// assert!(registry.find(&State::new("pending"), &State::new("paid")).is_some());
/// assert!(registry.find(&State::new("draft"), &State::new("shipped")).is_none());
/// ```
pub struct Registry<T> {
    definitions: Vec<TransitionDefinition<T>>,
    index: HashMap<Key, usize>,
    keys: Vec<Key>,
    events: HashMap<String, Vec<Key>>,
    event_names: Vec<String>,
    config: EngineConfig,
}

impl<T: 'static> Registry<T> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            definitions: Vec::new(),
            index: HashMap::new(),
            keys: Vec::new(),
            events: HashMap::new(),
            event_names: Vec::new(),
            config,
        }
    }

    /// Register every pair of `mapping`, optionally under an event `alias`,
    /// and apply `config` once to each created or fetched definition.
    ///
    /// Returns the definitions touched, in first-touched order.
    pub fn declare(
        &mut self,
        mapping: impl Into<Mapping>,
        alias: Option<&str>,
        config: Option<TransitionConfig<T>>,
    ) -> Result<Vec<&TransitionDefinition<T>>, BuildError> {
        let mapping = mapping.into();
        validate(&mapping, alias)?;

        let mut touched: Vec<usize> = Vec::new();
        for (starts, end) in mapping.pairs() {
            // shared only by the starts that are new in this pair
            let mut fresh: Option<usize> = None;

            for start in starts {
                let key = (start.clone(), end.clone());
                let slot = match self.index.get(&key).copied() {
                    Some(existing) => existing,
                    None => {
                        let slot = *fresh.get_or_insert_with(|| {
                            self.definitions.push(TransitionDefinition::new(end.clone()));
                            self.definitions.len() - 1
                        });
                        self.index.insert(key.clone(), slot);
                        self.keys.push(key.clone());
                        slot
                    }
                };
                if !touched.contains(&slot) {
                    touched.push(slot);
                }
                if let Some(alias) = alias {
                    self.push_event(alias, key);
                }
            }
        }

        if let Some(config) = &config {
            for &slot in &touched {
                config.apply(&mut self.definitions[slot]);
            }
        }

        tracing::debug!(
            pairs = mapping.pairs().len(),
            definitions = touched.len(),
            alias = alias.unwrap_or_default(),
            "declared transitions"
        );

        Ok(touched.iter().map(|&slot| &self.definitions[slot]).collect())
    }

    fn push_event(&mut self, alias: &str, key: Key) {
        match self.events.get_mut(alias) {
            Some(candidates) => candidates.push(key),
            None => {
                self.event_names.push(alias.to_string());
                self.events.insert(alias.to_string(), vec![key]);
            }
        }
    }

    /// Definition for `(start, end)`, falling back to `(ANY_STATE, end)`.
    pub fn find(&self, start: &State, end: &State) -> Option<&TransitionDefinition<T>> {
        self.index
            .get(&(start.clone(), end.clone()))
            .or_else(|| self.index.get(&(ANY_STATE, end.clone())))
            .map(|&slot| &self.definitions[slot])
    }

    /// Whether `end` was declared as an end state anywhere.
    pub fn find_any_target(&self, end: &State) -> bool {
        self.keys.iter().any(|(_, e)| e == end)
    }

    /// Distinct start and end states in first-seen order, wildcard excluded.
    pub fn states(&self) -> Vec<&State> {
        distinct(self.keys.iter().flat_map(|(start, end)| [start, end]))
    }

    /// Distinct start states in first-seen order, wildcard excluded.
    pub fn start_states(&self) -> Vec<&State> {
        distinct(self.keys.iter().map(|(start, _)| start))
    }

    pub fn end_states(&self) -> Vec<&State> {
        distinct(self.keys.iter().map(|(_, end)| end))
    }

    pub fn is_known_state(&self, state: &State) -> bool {
        state.is_named() && self.keys.iter().any(|(s, e)| s == state || e == state)
    }

    /// Every declared pair with its definition, in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = (&State, &State, &TransitionDefinition<T>)> {
        self.keys
            .iter()
            .map(move |key| (&key.0, &key.1, &self.definitions[self.index[key]]))
    }

    /// Candidates of `alias` in declaration order.
    pub fn events(&self, alias: &str) -> Option<&[(State, State)]> {
        self.events.get(alias).map(Vec::as_slice)
    }

    pub fn event_names(&self) -> &[String] {
        &self.event_names
    }

    pub fn has_event(&self, alias: &str) -> bool {
        self.events.contains_key(alias)
    }

    /// Candidate of `alias` applicable from `current`. Exact start matches
    /// win over the wildcard; ties go to the earliest declaration.
    pub fn resolve_event(&self, alias: &str, current: &State) -> Option<&(State, State)> {
        let candidates = self.events.get(alias)?;
        candidates
            .iter()
            .find(|(start, _)| start == current)
            .or_else(|| candidates.iter().find(|(start, _)| start.is_any()))
    }

    /// Distinct blocked messages configured on the definitions behind `alias`.
    pub fn blocked_messages(&self, alias: &str) -> Vec<&str> {
        let mut messages: Vec<&str> = Vec::new();
        for key in self.events.get(alias).into_iter().flatten() {
            let message = self
                .index
                .get(key)
                .and_then(|&slot| self.definitions[slot].blocked_message());
            if let Some(message) = message {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
        }
        messages
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the subject attribute holding the state.
    pub fn state_attribute(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.state_attribute = name.into();
        self
    }

    pub fn store_states_as_strings(&mut self) -> &mut Self {
        self.config.store_states_as_strings = true;
        self
    }

    pub fn set_initial_state(&mut self, state: impl Into<State>) -> &mut Self {
        self.config.initial_state = state.into();
        self
    }

    pub fn treat_all_transitions_as_hard(&mut self) -> &mut Self {
        self.config.force_hard_mode = true;
        self
    }

    /// Drop every declaration and restore the default configuration.
    pub fn reset(&mut self) {
        self.definitions.clear();
        self.index.clear();
        self.keys.clear();
        self.events.clear();
        self.event_names.clear();
        self.config = EngineConfig::default();
    }
}

impl<T: 'static> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(mapping: &Mapping, alias: Option<&str>) -> Result<(), BuildError> {
    if mapping.is_empty() {
        return Err(BuildError::EmptyMapping);
    }
    if alias.is_some_and(str::is_empty) {
        return Err(BuildError::EmptyAlias);
    }
    for (starts, end) in mapping.pairs() {
        if !end.is_named() {
            return Err(BuildError::ReservedEndState {
                state: end.to_string(),
            });
        }
        if starts.is_empty() {
            return Err(BuildError::MissingStartStates {
                end: end.to_string(),
            });
        }
        if let Some(start) = starts.iter().find(|s| s.is_nil()) {
            return Err(BuildError::ReservedStartState {
                state: start.to_string(),
            });
        }
    }
    Ok(())
}

fn distinct<'a>(states: impl Iterator<Item = &'a State>) -> Vec<&'a State> {
    let mut seen = HashSet::new();
    states
        .filter(|state| state.is_named() && seen.insert(*state))
        .collect()
}
