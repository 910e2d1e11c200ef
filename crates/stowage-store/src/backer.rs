//! Backer selection: probe a host facility once, fall back if it is unusable.
//!
//! Some hosts expose the storage interface but throw the moment it is
//! invoked. The probe sniffs that out with a sentinel write/read/delete
//! and the result is a tagged [`Backer`] the adapter keeps for its whole
//! lifetime. No exception-driven control flow at the call sites: the
//! choice is made exactly once, here.

use crate::error::Result;
use crate::facility::{AreaId, Facility};
use crate::fallback::FallbackStore;

/// Sentinel key used only by the usability probe.
const PROBE_KEY: &str = "__stowage_probe";

/// The concrete storage implementation an adapter delegates to.
///
/// Chosen once at construction and never swapped. Fallback operations
/// are total; facility operations can surface a [`StoreError`] after
/// construction (e.g. quota exhaustion), which propagates to the caller.
///
/// [`StoreError`]: crate::error::StoreError
pub enum Backer {
    /// A host facility that passed the usability probe.
    Facility(Box<dyn Facility>),
    /// The in-memory substitute.
    Fallback(FallbackStore),
}

/// Probe a host facility for usability and select the backer.
///
/// Performs a sentinel write, read, and delete. If any step fails the
/// facility is considered non-functional and a fresh [`FallbackStore`]
/// is returned instead; the failure is logged at debug level and never
/// surfaced to the caller.
pub fn probe(mut facility: Box<dyn Facility>) -> Backer {
    let usable = facility
        .set_item(PROBE_KEY, "1")
        .and_then(|()| facility.get_item(PROBE_KEY).map(|_| ()))
        .and_then(|()| facility.remove_item(PROBE_KEY));

    match usable {
        Ok(()) => Backer::Facility(facility),
        Err(e) => {
            tracing::debug!(
                kind = %facility.kind(),
                error = %e,
                "host facility failed the usability probe, using an in-memory fallback"
            );
            Backer::Fallback(FallbackStore::new())
        }
    }
}

impl Backer {
    /// Area identity when backed by a host facility.
    ///
    /// The fallback store is exclusively owned and never shared, so it
    /// has no area: cross-context notifications can never concern it.
    pub fn area(&self) -> Option<AreaId> {
        match self {
            Backer::Facility(f) => Some(f.area()),
            Backer::Fallback(_) => None,
        }
    }

    /// Whether the probe fell back to the in-memory store.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Backer::Fallback(_))
    }

    /// Number of entries currently stored.
    pub fn length(&self) -> usize {
        match self {
            Backer::Facility(f) => f.length(),
            Backer::Fallback(s) => s.length(),
        }
    }

    /// Key at the given position, or `None` past the end.
    pub fn key(&self, index: usize) -> Option<String> {
        match self {
            Backer::Facility(f) => f.key(index),
            Backer::Fallback(s) => s.key(index),
        }
    }

    /// Current value for a key, or `None` if absent.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self {
            Backer::Facility(f) => f.get_item(key),
            Backer::Fallback(s) => Ok(s.get_item(key)),
        }
    }

    /// Insert or overwrite a value.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            Backer::Facility(f) => f.set_item(key, value),
            Backer::Fallback(s) => {
                s.set_item(key, value);
                Ok(())
            }
        }
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove_item(&mut self, key: &str) -> Result<()> {
        match self {
            Backer::Facility(f) => f.remove_item(key),
            Backer::Fallback(s) => {
                s.remove_item(key);
                Ok(())
            }
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<()> {
        match self {
            Backer::Facility(f) => f.clear(),
            Backer::Fallback(s) => {
                s.clear();
                Ok(())
            }
        }
    }
}
