//! Subject used by the unit tests.

use crate::core::{Params, State, StateHistory, StateTransition, StoredState, Subject};
use serde_json::Value;

#[derive(Default)]
pub(crate) struct Record {
    pub state: Option<StoredState>,
    pub status: Option<StoredState>,
    pub messages: Vec<String>,
    pub flag: bool,
    pub refuse_save: bool,
    pub journal: Vec<String>,
    pub history: StateHistory,
}

impl Record {
    pub fn at(state: &str) -> Self {
        Self {
            state: Some(StoredState::Symbol(State::new(state))),
            ..Self::default()
        }
    }
}

impl Subject for Record {
    fn read_attribute(&self, name: &str) -> Option<StoredState> {
        match name {
            "state" => self.state.clone(),
            "status" => self.status.clone(),
            _ => None,
        }
    }

    fn write_attribute(&mut self, name: &str, value: StoredState) {
        match name {
            "state" => self.state = Some(value),
            "status" => self.status = Some(value),
            _ => {}
        }
    }

    fn failure_messages(&self) -> &[String] {
        &self.messages
    }

    fn push_failure_message(&mut self, message: String) {
        self.messages.push(message);
    }

    fn respond(&mut self, method: &str, _params: &Params) -> Option<Value> {
        match method {
            "greet" => Some(Value::from("hello")),
            "flag?" => Some(Value::Bool(self.flag)),
            "save" => {
                self.journal.push("save".into());
                Some(Value::Bool(!self.refuse_save))
            }
            _ => None,
        }
    }

    fn after_transition(&mut self, record: &StateTransition) {
        self.history = self.history.record(record.clone());
    }
}
