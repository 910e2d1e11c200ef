//! # Stowage Store
//!
//! Backer abstraction for stowage. Provides the host-facility contract,
//! the in-memory fallback store, and the usability probe that picks
//! between them.
//!
//! ## Overview
//!
//! A host may provide a key-value storage facility (durable or
//! session-scoped), may provide none at all, or may expose one that
//! throws the moment it is touched. This crate models that reality:
//!
//! - [`Facility`] - the contract a host storage facility must satisfy
//! - [`FallbackStore`] - an ordered in-memory store with the same shape
//! - [`Backer`] - the tagged union an adapter delegates to for its lifetime
//! - [`probe`] - sentinel write/read/delete that selects the backer once
//!
//! ## Usage
//!
//! ```rust
//! use stowage_store::{probe, Backer, FallbackStore};
//!
//! // No facility available: callers construct the fallback directly.
//! let mut backer = Backer::Fallback(FallbackStore::new());
//! backer.set_item("foo", "bar").unwrap();
//! assert_eq!(backer.get_item("foo").unwrap().as_deref(), Some("bar"));
//! ```
//!
//! ## Design Notes
//!
//! - **One probe, ever**: fallback selection happens at construction and
//!   is never retried. A probe failure is logged at debug level and
//!   swallowed; the caller only sees it through backer identity.
//! - **Total fallback**: [`FallbackStore`] operations cannot fail. Only
//!   facility-backed operations surface [`StoreError`].

pub mod backer;
pub mod error;
pub mod facility;
pub mod fallback;

pub use backer::{probe, Backer};
pub use error::{Result, StoreError};
pub use facility::{AreaId, Facility, FacilityKind};
pub use fallback::FallbackStore;
