//! Proptest generators for property-based testing.

use proptest::prelude::*;

use stowage::StorageAdapter;

/// A single storage mutation.
#[derive(Debug, Clone)]
pub enum Op {
    Set(String, String),
    Remove(String),
    Clear,
}

impl Op {
    /// Apply this mutation to an adapter.
    ///
    /// Panics on a backer failure; generated sequences are meant to run
    /// against fallback or working in-memory backers.
    pub fn apply(&self, storage: &StorageAdapter) {
        match self {
            Op::Set(k, v) => storage.set_item(k, v).expect("set on working backer"),
            Op::Remove(k) => storage.remove_item(k).expect("remove on working backer"),
            Op::Clear => storage.clear().expect("clear on working backer"),
        }
    }
}

/// Keys from a deliberately small alphabet, so sequences collide.
pub fn key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Short printable values.
pub fn value() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,6}"
}

/// A single mutation, weighted toward writes.
pub fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (key(), value()).prop_map(|(k, v)| Op::Set(k, v)),
        2 => key().prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

/// A sequence of up to `max` mutations.
pub fn ops(max: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..=max)
}

/// An expiry deadline within a small positive range (Unix ms).
pub fn deadline() -> impl Strategy<Value = i64> {
    1i64..=10_000_000
}
