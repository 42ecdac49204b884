//! End-to-end scenarios against the public API.

use serde_json::{json, Value};
use statecraft::builder::{Mapping, Registry, TransitionConfig};
use statecraft::core::{Params, Predicate, State, StateHistory, StateTransition, StoredState, Subject};
use statecraft::effects::{FnAction, FnConcluder, StateMachine, TransitionError};
use statecraft::mapping;

#[derive(Default)]
struct Order {
    status: Option<StoredState>,
    errors: Vec<String>,
    balance: i64,
    ledger: Vec<String>,
    history: StateHistory,
}

impl Order {
    fn in_state(state: &str) -> Self {
        Self {
            status: Some(StoredState::Symbol(State::new(state))),
            ..Self::default()
        }
    }
}

impl Subject for Order {
    fn read_attribute(&self, name: &str) -> Option<StoredState> {
        match name {
            "status" | "state" => self.status.clone(),
            _ => None,
        }
    }

    fn write_attribute(&mut self, name: &str, value: StoredState) {
        if matches!(name, "status" | "state") {
            self.status = Some(value);
        }
    }

    fn failure_messages(&self) -> &[String] {
        &self.errors
    }

    fn push_failure_message(&mut self, message: String) {
        self.errors.push(message);
    }

    fn respond(&mut self, method: &str, _params: &Params) -> Option<Value> {
        match method {
            "balance" => Some(json!(self.balance)),
            _ => None,
        }
    }

    fn after_transition(&mut self, record: &StateTransition) {
        self.history = self.history.record(record.clone());
    }
}

fn no_params() -> Params {
    Params::new()
}

#[test]
fn single_declaration_scenario() {
    let mut registry = Registry::<Order>::new();
    registry.declare(("a", "b"), None, None).unwrap();

    let mut order = Order::in_state("a");
    let mut machine = StateMachine::new(&registry, &mut order);
    assert!(matches!(
        machine.transition_hard("z", &no_params()),
        Err(TransitionError::UnknownState { state }) if state == State::new("z")
    ));
    assert!(machine.transition("b", &no_params()).unwrap());
    assert_eq!(machine.state(), State::new("b"));
    assert!(!machine.can_transition("b"));

    let mut order = Order::in_state("c");
    let mut machine = StateMachine::new(&registry, &mut order);
    assert!(!machine.transition("b", &no_params()).unwrap());
    assert_eq!(order.status, Some(StoredState::Symbol(State::new("c"))));
}

#[test]
fn event_alias_scenario() {
    let mut registry = Registry::<Order>::new();
    registry
        .declare(
            mapping! { a => b, c => d },
            Some("go"),
            Some(TransitionConfig::new().blocked("go is not available")),
        )
        .unwrap();

    let mut order = Order::in_state("c");
    assert!(StateMachine::new(&registry, &mut order).fire("go", &no_params()).unwrap());
    assert_eq!(order.status, Some(StoredState::Symbol(State::new("d"))));

    let mut order = Order::in_state("z");
    assert!(!StateMachine::new(&registry, &mut order).fire("go", &no_params()).unwrap());
    assert_eq!(order.status, Some(StoredState::Symbol(State::new("z"))));
    assert_eq!(order.errors, ["go is not available"]);
}

#[test]
fn string_storage_scenario() {
    let mut registry = Registry::<Order>::new();
    registry.store_states_as_strings();
    registry.declare(("a", "b"), None, None).unwrap();

    let mut order = Order::in_state("a");
    let mut machine = StateMachine::new(&registry, &mut order);
    assert!(machine.transition("b", &no_params()).unwrap());
    assert_eq!(machine.state(), State::new("b"));
    assert_eq!(machine.dispatch("b?", &no_params()).unwrap(), json!(true));
    assert_eq!(order.status, Some(StoredState::Text("b".to_string())));
}

#[test]
fn payment_workflow_with_rollback() {
    let mut registry = Registry::<Order>::new();
    registry.state_attribute("status").set_initial_state("cart");
    registry
        .declare(
            Mapping::new().pair(["cart", "checkout"], "paid"),
            Some("pay"),
            Some(
                TransitionConfig::new()
                    .require(["amount"])
                    .guard(
                        Predicate::new(|_: &Order, _: &State, p: &Params| {
                            p.get("amount").and_then(Value::as_i64).unwrap_or(0) > 0
                        })
                        .with_message("amount must be positive"),
                    )
                    .action(
                        FnAction::new(|o: &mut Order, _: &State| {
                            o.ledger.push("reserve".into());
                            true
                        })
                        .on_rollback(|o: &mut Order, _: &State| {
                            o.ledger.push("release".into());
                            Ok(())
                        }),
                    )
                    .concluder(
                        FnConcluder::new(|o: &mut Order, _: &State, p: &Params| {
                            o.balance += p.get("amount").and_then(Value::as_i64).unwrap_or(0);
                            o.ledger.push("charge".into());
                            true
                        })
                        .on_rollback(|o: &mut Order, _: &State, p: &Params| {
                            o.balance -= p.get("amount").and_then(Value::as_i64).unwrap_or(0);
                            o.ledger.push("refund".into());
                            Ok(())
                        }),
                    )
                    .concluder(FnConcluder::new(|o: &mut Order, _: &State, p: &Params| {
                        let ok = p.get("amount").and_then(Value::as_i64).unwrap_or(0) < 1_000;
                        if !ok {
                            o.push_failure_message("fraud check failed".into());
                        }
                        ok
                    })),
            ),
        )
        .unwrap();
    registry.declare(Mapping::new().from_any("cancelled"), Some("cancel"), None).unwrap();

    let amount = |value: i64| {
        let mut params = Params::new();
        params.insert("amount".into(), json!(value));
        params
    };

    let mut order = Order::default();
    let mut machine = StateMachine::new(&registry, &mut order);
    assert_eq!(machine.state(), State::new("cart"));

    match machine.fire_hard("pay", &amount(5_000)) {
        Err(TransitionError::ConcluderFailed { messages, .. }) => {
            assert_eq!(messages, ["fraud check failed"]);
        }
        other => panic!("Expected ConcluderFailed, got {other:?}"),
    }
    assert_eq!(machine.dispatch("balance", &no_params()).unwrap(), json!(0));
    assert!(machine.is_in("cart"));

    assert!(!machine.fire("pay", &amount(-1)).unwrap());
    assert!(machine.fire("pay", &amount(40)).unwrap());
    assert!(machine.dispatch("paid?", &no_params()).unwrap().as_bool().unwrap());
    assert!(machine.dispatch("cancel!", &no_params()).unwrap().as_bool().unwrap());

    assert_eq!(
        order.ledger,
        ["reserve", "charge", "refund", "release", "reserve", "charge"]
    );
    assert_eq!(order.balance, 40);
    assert_eq!(
        order.errors,
        ["fraud check failed", "amount must be positive"]
    );
    assert_eq!(
        order.history.get_path(),
        vec![&State::new("cart"), &State::new("paid"), &State::new("cancelled")]
    );
    assert_eq!(order.history.transitions()[1].event.as_deref(), Some("cancel"));
}

#[test]
fn registry_reset_isolates_configuration() {
    let mut registry = Registry::<Order>::new();
    registry.treat_all_transitions_as_hard();
    registry.declare(("a", "b"), Some("go"), None).unwrap();
    registry.reset();

    registry.declare(("x", "y"), None, None).unwrap();
    let mut order = Order::in_state("a");
    let mut machine = StateMachine::new(&registry, &mut order);

    assert!(matches!(
        machine.fire("go", &no_params()),
        Err(TransitionError::NoSuchMethod { .. })
    ));
    assert!(!machine.transition("y", &no_params()).unwrap());
}
