//! # Stowage
//!
//! A uniform, event-observable key-value storage abstraction over a
//! host's durable or session-scoped storage facility, degrading to an
//! in-memory substitute when no usable facility exists.
//!
//! ## Overview
//!
//! - **Adapter**: [`StorageAdapter`] wraps a backer (host facility or
//!   fallback) behind one CRUD + enumeration contract and emits exactly
//!   one normalized `change` event per mutation, local or cross-context.
//! - **Bridge**: [`NotificationHub`] normalizes host cross-context
//!   notifications into the same event shape, filtered by storage area.
//! - **Scoping**: [`Scope`] is a stateless view that prefixes keys
//!   before delegating to its root adapter.
//! - **Expiry**: [`encode_expiry_value`] / [`decode_expiry_value`] wrap
//!   a value with an advisory deadline, checked lazily on decode.
//!
//! ## Usage
//!
//! ```rust
//! use stowage::StorageRuntime;
//!
//! // No host available: both adapters run on the in-memory fallback.
//! let runtime = StorageRuntime::detached();
//! let storage = runtime.durable();
//!
//! storage.add_listener(|event| {
//!     println!("changed: {:?}", event.key);
//! });
//!
//! storage.set_item("foo", "bar").unwrap();
//! assert_eq!(storage.get_item("foo").unwrap().as_deref(), Some("bar"));
//!
//! let prefs = storage.scope("prefs");
//! prefs.set_item("theme", "dark").unwrap();
//! assert_eq!(storage.get_item("prefs-theme").unwrap().as_deref(), Some("dark"));
//! ```
//!
//! ## Design Notes
//!
//! - **One event per mutation**: local writes synthesize their own
//!   event (hosts do not notify the writing context); cross-context
//!   notifications are re-emitted through the bridge. Never both.
//! - **Fallback is silent**: an unusable facility is detected once at
//!   construction and replaced without surfacing an error.
//! - **Expiry is advisory**: nothing sweeps expired entries; absence is
//!   only observed on the next decode of that value.

pub mod adapter;
pub mod bridge;
pub mod events;
pub mod expiry;
pub mod runtime;
pub mod scope;

// Re-export the store crate for advanced use
pub use stowage_store as store;

pub use adapter::StorageAdapter;
pub use bridge::{HostNotification, NotificationHub};
pub use events::ChangeEvent;
pub use expiry::{
    decode_expiry_value, decode_expiry_value_at, encode_expiry_value, Clock, DecodeError,
    SystemClock,
};
pub use runtime::{Host, StorageRuntime};
pub use scope::Scope;

// Re-export commonly used store types
pub use stowage_store::{AreaId, Backer, Facility, FacilityKind, FallbackStore, StoreError};
