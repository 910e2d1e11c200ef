//! The storage adapter: one CRUD contract, one change stream.
//!
//! An adapter wraps whichever backer the probe selected at construction
//! (a host facility or the in-memory fallback) and emits exactly one
//! normalized [`ChangeEvent`] per mutation, whether the mutation
//! was performed locally or observed from another execution context.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use stowage_store::{probe, Backer, Facility, FallbackStore, Result};

use crate::bridge::{HostNotification, NotificationHub};
use crate::events::{ChangeEvent, Subject};
use crate::scope::Scope;

/// A storage adapter bound to one backer for its whole lifetime.
///
/// Hosts do not notify the execution context that performed a write, so
/// every local mutation synthesizes its own event; cross-context
/// notifications arrive through the [`NotificationHub`] and are
/// re-emitted in the same shape. Subscribers see one `change` event per
/// mutation either way.
///
/// The backer and the subscriber list are each behind a mutex; the
/// design is single-logical-thread, the mutexes only make that safe on
/// hosts with real OS threads.
pub struct StorageAdapter {
    backer: Mutex<Backer>,
    subject: Subject,
    // Set by `Arc::new_cyclic` at construction; upgradable for as long
    // as any caller can reach the adapter.
    weak_self: Weak<StorageAdapter>,
}

impl StorageAdapter {
    /// Construct an adapter, probing the facility if one is given.
    ///
    /// A facility that fails the probe is silently replaced by a fresh
    /// fallback store. Only a facility that passes is attached to the
    /// hub for cross-context notifications; the fallback is private to
    /// this adapter and can never be mutated from another context.
    pub fn new(facility: Option<Box<dyn Facility>>, hub: &NotificationHub) -> Arc<Self> {
        let backer = match facility {
            Some(f) => probe(f),
            None => Backer::Fallback(FallbackStore::new()),
        };
        let area = backer.area();

        let adapter = Arc::new_cyclic(|weak| Self {
            backer: Mutex::new(backer),
            subject: Subject::new(),
            weak_self: weak.clone(),
        });

        if let Some(area) = area {
            hub.attach(area, Arc::downgrade(&adapter));
        }

        adapter
    }

    /// Construct an adapter on the in-memory fallback, detached from
    /// any notification hub.
    pub fn detached() -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            backer: Mutex::new(Backer::Fallback(FallbackStore::new())),
            subject: Subject::new(),
            weak_self: weak.clone(),
        })
    }

    fn backer(&self) -> MutexGuard<'_, Backer> {
        self.backer.lock().unwrap()
    }

    /// Whether the probe fell back to the in-memory store.
    pub fn is_fallback(&self) -> bool {
        self.backer().is_fallback()
    }

    /// Number of entries currently stored.
    pub fn length(&self) -> usize {
        self.backer().length()
    }

    /// Key at the given position, or `None` past the end.
    pub fn key(&self, index: usize) -> Option<String> {
        self.backer().key(index)
    }

    /// Current value for a key, or `None` if absent.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.backer().get_item(key)
    }

    /// Insert or overwrite a value, then emit one `change` event.
    ///
    /// A failure from a working facility (e.g. quota exhaustion)
    /// propagates to the caller before any event is emitted.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let event = {
            let mut backer = self.backer();
            let old = backer.get_item(key)?;
            backer.set_item(key, value)?;
            ChangeEvent {
                key: Some(key.to_owned()),
                old_value: old,
                new_value: Some(value.to_owned()),
            }
        };
        // Backer lock is released before handlers run so they may read
        // back through the adapter.
        self.subject.emit(&event);
        Ok(())
    }

    /// Remove a key, then emit one `change` event.
    ///
    /// Removing an absent key is a no-op on the store but still emits,
    /// with `old_value` absent.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        let event = {
            let mut backer = self.backer();
            let old = backer.get_item(key)?;
            backer.remove_item(key)?;
            ChangeEvent {
                key: Some(key.to_owned()),
                old_value: old,
                new_value: None,
            }
        };
        self.subject.emit(&event);
        Ok(())
    }

    /// Remove every entry, then emit the reset event (all fields absent).
    pub fn clear(&self) -> Result<()> {
        {
            let mut backer = self.backer();
            backer.clear()?;
        }
        self.subject.emit(&ChangeEvent::reset());
        Ok(())
    }

    /// Derive a namespaced view rooted at this adapter.
    pub fn scope(&self, name: &str) -> Scope {
        let root = self
            .weak_self
            .upgrade()
            .expect("a reachable adapter is Arc-owned");
        Scope::new(root, name)
    }

    /// Register a `change` handler. Handlers run synchronously, before
    /// the mutating call returns.
    pub fn add_listener(&self, handler: impl Fn(&ChangeEvent) + Send + Sync + 'static) {
        self.subject.subscribe(handler);
    }

    /// Drop every registered handler.
    pub fn remove_all_listeners(&self) {
        self.subject.clear();
    }

    /// Re-emit a cross-context notification as a normal `change` event.
    ///
    /// The underlying facility was already mutated by the other context;
    /// nothing is applied locally. Called by the hub after area
    /// filtering, so the notification is known to concern this backer.
    pub(crate) fn forward_host_change(&self, note: &HostNotification) {
        self.subject.emit(&ChangeEvent {
            key: note.key.clone(),
            old_value: note.old_value.clone(),
            new_value: note.new_value.clone(),
        });
    }
}
