//! Change events and the observer subject that delivers them.
//!
//! The adapter owns a [`Subject`] by composition rather than inheriting
//! from a generic emitter. `change` is the only event this crate emits.

use std::sync::{Arc, Mutex};

/// A normalized storage change notification.
///
/// The same shape is used for local mutations and for cross-context
/// notifications forwarded by the bridge, so subscribers never need to
/// distinguish the origin of a write.
///
/// All three fields are `None` for a `clear()`: that is the reset
/// signal, not a per-key removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The mutated key, or `None` for a reset.
    pub key: Option<String>,
    /// Value before the mutation, `None` if the key was absent.
    pub old_value: Option<String>,
    /// Value after the mutation, `None` for a removal or reset.
    pub new_value: Option<String>,
}

impl ChangeEvent {
    /// The reset event emitted by `clear()`.
    pub fn reset() -> Self {
        Self {
            key: None,
            old_value: None,
            new_value: None,
        }
    }
}

type Handler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// An observer list for [`ChangeEvent`]s.
///
/// Handlers run synchronously, in registration order, on the thread
/// that performed the mutation. The list is snapshotted before
/// delivery, so a handler may register or remove listeners without
/// deadlocking.
#[derive(Default)]
pub struct Subject {
    handlers: Mutex<Vec<Handler>>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every subsequent event.
    pub fn subscribe(&self, handler: impl Fn(&ChangeEvent) + Send + Sync + 'static) {
        self.handlers.lock().unwrap().push(Arc::new(handler));
    }

    /// Drop every registered handler.
    pub fn clear(&self) {
        self.handlers.lock().unwrap().clear();
    }

    /// Deliver an event to every handler registered at call time.
    pub fn emit(&self, event: &ChangeEvent) {
        let snapshot: Vec<Handler> = self.handlers.lock().unwrap().clone();
        for handler in snapshot {
            handler(event);
        }
    }
}
