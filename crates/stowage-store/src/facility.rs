//! Facility trait: the contract a host storage facility must satisfy.
//!
//! A facility is host-owned; this crate only consumes it. Some hosts
//! expose the interface but throw on every call, which is why all
//! mutating and reading operations are fallible here.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

/// Which host facility a store is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityKind {
    /// Survives across sessions ("localStorage" semantics).
    Durable,
    /// Scoped to the current session ("sessionStorage" semantics).
    Session,
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityKind::Durable => write!(f, "durable"),
            FacilityKind::Session => write!(f, "session"),
        }
    }
}

/// Process-unique identity of a storage area.
///
/// Hosts deliver one global change-notification stream; an adapter uses
/// the area identity to recognize notifications meant for its own backer
/// and ignore those meant for the sibling adapter of the other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaId(u64);

impl AreaId {
    /// Allocate a fresh identity. Never reused within a process.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        AreaId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area#{}", self.0)
    }
}

/// A host-provided key-value storage facility.
///
/// Same flat string-keyed contract as [`FallbackStore`], except that
/// every read or write may fail: the host owns the real storage and can
/// refuse service at any point (quota, denied access, corruption).
///
/// [`FallbackStore`]: crate::fallback::FallbackStore
pub trait Facility: Send {
    /// Which kind of facility this is.
    fn kind(&self) -> FacilityKind;

    /// Identity of the storage area behind this handle.
    ///
    /// Two handles onto the same underlying area (e.g. from different
    /// execution contexts) must report the same `AreaId`.
    fn area(&self) -> AreaId;

    /// Number of entries currently stored.
    fn length(&self) -> usize;

    /// Key at the given position, or `None` past the end.
    fn key(&self, index: usize) -> Option<String>;

    /// Current value for a key, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;

    /// Remove every entry.
    fn clear(&mut self) -> Result<()>;
}
