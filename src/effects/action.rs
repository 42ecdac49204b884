//! Side-effecting collaborators: actions and concluders.

use crate::core::{Params, State, Subject};
use serde_json::Value;

/// Error raised by a compensating rollback. Propagated unchanged.
pub type RollbackError = Box<dyn std::error::Error + Send + Sync>;

/// Side effect run after guards pass and before concluders.
///
/// Returning `false` vetoes the transition without raising, in either mode.
pub trait Action<T>: Send + Sync {
    fn call(&self, subject: &mut T, to: &State) -> bool;

    /// Undo the effect of `call`; `previous` is the state the subject is
    /// left in.
    fn rollback(&self, _subject: &mut T, _previous: &State) -> Result<(), RollbackError> {
        Ok(())
    }
}

/// Ordered post-action step with a compensating rollback.
pub trait Concluder<T>: Send + Sync {
    fn call(&self, subject: &mut T, to: &State, params: &Params) -> bool;

    fn rollback(&self, _subject: &mut T, _to: &State, _params: &Params) -> Result<(), RollbackError> {
        Ok(())
    }
}

/// Action used when a definition configures none. Always succeeds and
/// performs no rollback.
pub struct NoopAction;

impl<T> Action<T> for NoopAction {
    fn call(&self, _subject: &mut T, _to: &State) -> bool {
        true
    }
}

type ActionFn<T> = Box<dyn Fn(&mut T, &State) -> bool + Send + Sync>;
type ActionRollbackFn<T> = Box<dyn Fn(&mut T, &State) -> Result<(), RollbackError> + Send + Sync>;

/// Action built from closures.
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use statecraft::effects::{Action, FnAction};
///
/// struct Counter(u32);
///
/// let bump = FnAction::new(|c: &mut Counter, _to: &State| {
///     c.0 += 1;
///     true
/// })
/// .on_rollback(|c: &mut Counter, _previous: &State| {
///     c.0 -= 1;
///     Ok(())
/// });
///
/// let mut counter = Counter(0);
/// assert!(bump.call(&mut counter, &State::new("next")));
/// bump.rollback(&mut counter, &State::new("prev")).unwrap();
/// assert_eq!(counter.0, 0);
/// ```
pub struct FnAction<T> {
    call: ActionFn<T>,
    rollback: Option<ActionRollbackFn<T>>,
}

impl<T> FnAction<T> {
    pub fn new<F>(call: F) -> Self
    where
        F: Fn(&mut T, &State) -> bool + Send + Sync + 'static,
    {
        Self {
            call: Box::new(call),
            rollback: None,
        }
    }

    pub fn on_rollback<F>(mut self, rollback: F) -> Self
    where
        F: Fn(&mut T, &State) -> Result<(), RollbackError> + Send + Sync + 'static,
    {
        self.rollback = Some(Box::new(rollback));
        self
    }
}

impl<T> Action<T> for FnAction<T> {
    fn call(&self, subject: &mut T, to: &State) -> bool {
        (self.call)(subject, to)
    }

    fn rollback(&self, subject: &mut T, previous: &State) -> Result<(), RollbackError> {
        match &self.rollback {
            Some(rollback) => rollback(subject, previous),
            None => Ok(()),
        }
    }
}

type ConcluderFn<T> = Box<dyn Fn(&mut T, &State, &Params) -> bool + Send + Sync>;
type ConcluderRollbackFn<T> =
    Box<dyn Fn(&mut T, &State, &Params) -> Result<(), RollbackError> + Send + Sync>;

/// Concluder built from closures. Without `on_rollback` the rollback is a
/// no-op.
pub struct FnConcluder<T> {
    call: ConcluderFn<T>,
    rollback: Option<ConcluderRollbackFn<T>>,
}

impl<T> FnConcluder<T> {
    pub fn new<F>(call: F) -> Self
    where
        F: Fn(&mut T, &State, &Params) -> bool + Send + Sync + 'static,
    {
        Self {
            call: Box::new(call),
            rollback: None,
        }
    }

    pub fn on_rollback<F>(mut self, rollback: F) -> Self
    where
        F: Fn(&mut T, &State, &Params) -> Result<(), RollbackError> + Send + Sync + 'static,
    {
        self.rollback = Some(Box::new(rollback));
        self
    }
}

impl<T> Concluder<T> for FnConcluder<T> {
    fn call(&self, subject: &mut T, to: &State, params: &Params) -> bool {
        (self.call)(subject, to, params)
    }

    fn rollback(&self, subject: &mut T, to: &State, params: &Params) -> Result<(), RollbackError> {
        match &self.rollback {
            Some(rollback) => rollback(subject, to, params),
            None => Ok(()),
        }
    }
}

/// Subject method called by [`Persist`].
pub const SAVE_METHOD: &str = "save";

/// Default finalizer: asks the subject to save itself through
/// [`Subject::respond`] with [`SAVE_METHOD`].
///
/// An explicit `false` reply fails the transition; any other reply,
/// including none, counts as saved. Rollback saves again so the restored
/// subject is what gets persisted.
pub struct Persist;

impl Persist {
    fn save<T: Subject>(subject: &mut T, params: &Params) -> bool {
        !matches!(subject.respond(SAVE_METHOD, params), Some(Value::Bool(false)))
    }
}

impl<T: Subject> Concluder<T> for Persist {
    fn call(&self, subject: &mut T, _to: &State, params: &Params) -> bool {
        Self::save(subject, params)
    }

    fn rollback(&self, subject: &mut T, to: &State, params: &Params) -> Result<(), RollbackError> {
        if Self::save(subject, params) {
            Ok(())
        } else {
            Err(format!("save refused while rolling back transition to '{to}'").into())
        }
    }
}
