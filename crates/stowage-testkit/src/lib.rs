//! # Stowage Testkit
//!
//! Testing utilities for stowage.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: scriptable host facilities (working, broken, or
//!   quota-limited), a recording change listener, a manual clock for
//!   expiry tests, and a ready-made host + runtime pair
//! - **Generators**: proptest strategies for operation sequences
//!
//! ## Fixtures
//!
//! ```rust
//! use stowage_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let storage = fixture.runtime.durable();
//!
//! storage.set_item("foo", "bar").unwrap();
//! assert!(!storage.is_fallback());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use stowage_testkit::generators::{ops, Op};
//!
//! proptest! {
//!     #[test]
//!     fn replaying_ops_never_panics(ops in ops(64)) {
//!         // drive an adapter with the generated sequence...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{ManualClock, MemFacility, RecordingListener, TestFixture, TestHost};
