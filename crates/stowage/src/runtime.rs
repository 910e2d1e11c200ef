//! Composition root: the two preconfigured adapters and their hub.
//!
//! The original design exposed module-level singletons; here the pair
//! is an explicitly constructed, injectable value so tests can swap the
//! host out from under it.

use std::sync::Arc;

use stowage_store::{Facility, FacilityKind};

use crate::adapter::StorageAdapter;
use crate::bridge::NotificationHub;

/// The host environment adapters are built against.
///
/// `open_facility` returns `None` when the host offers no facility of
/// that kind at all; a facility that exists but is broken should be
/// returned as-is, the adapter's probe will find out.
pub trait Host {
    fn open_facility(&self, kind: FacilityKind) -> Option<Box<dyn Facility>>;
}

/// One durable and one session adapter over a shared notification hub.
///
/// Each adapter probes its facility independently, so one can run on
/// the host while the other runs on the fallback. Built once at
/// application start and kept for the process lifetime.
pub struct StorageRuntime {
    hub: Arc<NotificationHub>,
    durable: Arc<StorageAdapter>,
    session: Arc<StorageAdapter>,
}

impl StorageRuntime {
    /// Build the runtime against a host.
    pub fn new(host: &dyn Host) -> Self {
        let hub = Arc::new(NotificationHub::new());
        let durable = StorageAdapter::new(host.open_facility(FacilityKind::Durable), &hub);
        let session = StorageAdapter::new(host.open_facility(FacilityKind::Session), &hub);
        tracing::debug!(
            durable_fallback = durable.is_fallback(),
            session_fallback = session.is_fallback(),
            "storage runtime constructed"
        );
        Self {
            hub,
            durable,
            session,
        }
    }

    /// Build a runtime with no host at all: both adapters run on the
    /// in-memory fallback and no cross-context notifications exist.
    pub fn detached() -> Self {
        struct NoHost;
        impl Host for NoHost {
            fn open_facility(&self, _kind: FacilityKind) -> Option<Box<dyn Facility>> {
                None
            }
        }
        Self::new(&NoHost)
    }

    /// The adapter bound to the durable facility.
    pub fn durable(&self) -> &Arc<StorageAdapter> {
        &self.durable
    }

    /// The adapter bound to the session-scoped facility.
    pub fn session(&self) -> &Arc<StorageAdapter> {
        &self.session
    }

    /// The process-wide notification hub. Host integrations feed
    /// cross-context notifications in here.
    pub fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }
}
