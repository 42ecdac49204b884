//! Order Workflow
//!
//! An order moves from cart to paid to shipped, and can be cancelled from
//! anywhere.
//!
//! Key concepts:
//! - Engine settings loaded from JSON
//! - Guards with failure messages
//! - A payment action plus a concluder chain with rollback
//! - The default persistence finalizer calling the order's `save`
//! - Soft and hard event calls
//!
//! Run with: RUST_LOG=statecraft=debug cargo run --example order_workflow

use serde_json::{json, Value};
use statecraft::builder::{Mapping, Registry, TransitionConfig};
use statecraft::core::{Params, Predicate, State, StateHistory, StateTransition, StoredState, Subject};
use statecraft::effects::{FnAction, FnConcluder, StateMachine};
use statecraft::{mapping, EngineConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Default)]
struct Order {
    status: Option<StoredState>,
    errors: Vec<String>,
    total: f64,
    address: Option<String>,
    charged: f64,
    history: StateHistory,
}

impl Subject for Order {
    fn read_attribute(&self, name: &str) -> Option<StoredState> {
        (name == "status").then(|| self.status.clone()).flatten()
    }

    fn write_attribute(&mut self, name: &str, value: StoredState) {
        if name == "status" {
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
            "charged" => Some(json!(self.charged)),
            "save" => {
                println!("  saved order in {:?}", self.status);
                Some(json!(true))
            }
            _ => None,
        }
    }

    fn after_transition(&mut self, record: &StateTransition) {
        println!("  committed {} -> {}", record.from, record.to);
        self.history = self.history.record(record.clone());
    }
}

fn build_registry() -> Result<Registry<Order>, Box<dyn std::error::Error>> {
    let config = EngineConfig::from_json(
        r#"{ "state_attribute": "status", "initial_state": "cart", "store_states_as_strings": true }"#,
    )?;
    let mut registry = Registry::with_config(config);

    registry.declare(
        mapping! { cart => paid },
        Some("pay"),
        Some(
            TransitionConfig::new()
                .guard(
                    Predicate::new(|o: &Order, _: &State, _: &Params| o.total > 0.0)
                        .with_message("order is empty"),
                )
                .action(
                    FnAction::new(|o: &mut Order, _: &State| {
                        o.charged = o.total;
                        true
                    })
                    .on_rollback(|o: &mut Order, _: &State| {
                        o.charged = 0.0;
                        Ok(())
                    }),
                )
                .concluder(FnConcluder::new(|o: &mut Order, _: &State, _: &Params| {
                    let ok = o.total < 500.0;
                    if !ok {
                        o.push_failure_message("payment declined".into());
                    }
                    ok
                }))
                .blocked("order already paid"),
        ),
    )?;

    registry.declare(
        mapping! { paid => shipped },
        Some("ship"),
        Some(
            TransitionConfig::new()
                .require(["carrier"])
                .guard(
                    Predicate::new(|o: &Order, _: &State, _: &Params| o.address.is_some())
                        .with_message("missing shipping address"),
                )
                .persist(),
        ),
    )?;

    registry.declare(
        Mapping::new().from_any("cancelled"),
        Some("cancel"),
        None,
    )?;

    Ok(registry)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    println!("=== Order Workflow ===\n");
    let registry = build_registry()?;
    println!("States: {:?}", registry.states());
    println!("Events: {:?}\n", registry.event_names());

    let mut order = Order {
        total: 900.0,
        ..Order::default()
    };
    let mut machine = StateMachine::new(&registry, &mut order);
    println!("Initial state: {}", machine.state());

    println!("\nPaying a large order:");
    match machine.fire_hard("pay", &Params::new()) {
        Ok(done) => println!("  committed: {done}"),
        Err(err) => println!("  error: {err}"),
    }
    println!("  charged after rollback: {}", machine.dispatch("charged", &Params::new())?);

    machine.subject_mut().total = 120.0;
    println!("\nPaying a regular order:");
    println!("  committed: {}", machine.fire("pay", &Params::new())?);
    println!("  paying again: {}", machine.fire("pay", &Params::new())?);

    let mut params = Params::new();
    params.insert("carrier".into(), json!("postal"));
    println!("\nShipping without an address:");
    println!("  committed: {}", machine.fire("ship", &params)?);

    machine.subject_mut().address = Some("1 Main St".to_string());
    println!("\nShipping with an address:");
    println!("  committed: {}", machine.dispatch("ship!", &params)?);
    println!("  shipped? {}", machine.dispatch("shipped?", &Params::new())?);

    println!("\nFailure messages: {:?}", machine.failure_messages());
    let path: Vec<String> = order.history.get_path().iter().map(|s| s.to_string()).collect();
    println!("Path: {}", path.join(" -> "));
    println!("Stored value: {:?}", order.status);

    Ok(())
}
