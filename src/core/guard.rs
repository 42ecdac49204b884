//! Guard predicates for controlling state transitions.
//!
//! Guards decide whether a transition may proceed. They run before any
//! side effect and are expected to leave the subject untouched apart from
//! appending a human-readable reason to its failure-message list.

use super::state::State;
use super::subject::{Params, Subject};

/// Predicate deciding whether a transition to `to` may proceed.
///
/// `evaluate` is the enforcing form used while executing a transition and
/// may record why it rejected the attempt. `would_allow` is the probing
/// form and must not touch the subject.
pub trait Guard<T>: Send + Sync {
    fn evaluate(&self, subject: &mut T, to: &State, params: &Params) -> bool;

    fn would_allow(&self, subject: &T, to: &State, params: &Params) -> bool;
}

type PredicateFn<T> = Box<dyn Fn(&T, &State, &Params) -> bool + Send + Sync>;

/// Guard built from a pure predicate function.
///
/// When a message is attached, a rejected `evaluate` appends it to the
/// subject's failure messages.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Guard, Params, Predicate, State, StoredState, Subject};
///
/// #[derive(Default)]
/// struct Cart {
///     items: usize,
///     errors: Vec<String>,
/// }
///
/// impl Subject for Cart {
///     fn read_attribute(&self, _name: &str) -> Option<StoredState> { None }
///     fn write_attribute(&mut self, _name: &str, _value: StoredState) {}
///     fn failure_messages(&self) -> &[String] { &self.errors }
///     fn push_failure_message(&mut self, message: String) { self.errors.push(message) }
/// }
///
/// let has_items = Predicate::new(|cart: &Cart, _to: &State, _params: &Params| cart.items > 0)
///     .with_message("cart is empty");
///
/// let mut cart = Cart::default();
/// let to = State::new("checkout");
/// assert!(!has_items.would_allow(&cart, &to, &Params::new()));
/// assert!(cart.errors.is_empty());
///
/// assert!(!has_items.evaluate(&mut cart, &to, &Params::new()));
/// assert_eq!(cart.errors, vec!["cart is empty".to_string()]);
/// ```
pub struct Predicate<T> {
    predicate: PredicateFn<T>,
    message: Option<String>,
}

impl<T> Predicate<T> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T, &State, &Params) -> bool + Send + Sync + 'static,
    {
        Predicate {
            predicate: Box::new(predicate),
            message: None,
        }
    }

    /// Message appended to the subject when the guard rejects.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn check(&self, subject: &T, to: &State, params: &Params) -> bool {
        (self.predicate)(subject, to, params)
    }
}

impl<T: Subject> Guard<T> for Predicate<T> {
    fn evaluate(&self, subject: &mut T, to: &State, params: &Params) -> bool {
        let allowed = self.check(subject, to, params);
        if !allowed {
            if let Some(message) = &self.message {
                subject.push_failure_message(message.clone());
            }
        }
        allowed
    }

    fn would_allow(&self, subject: &T, to: &State, params: &Params) -> bool {
        self.check(subject, to, params)
    }
}
