//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: scriptable host facilities,
//! a recording change listener, and a manual clock for expiry tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use stowage::{
    ChangeEvent, Clock, Host, HostNotification, StorageAdapter, StorageRuntime,
};
use stowage_store::{AreaId, Facility, FacilityKind, FallbackStore, Result, StoreError};

/// A scriptable in-memory host facility.
///
/// Clones share the same underlying area, the way two execution
/// contexts share one host storage area: a write through one clone is
/// visible through the others, and all clones report the same
/// [`AreaId`].
#[derive(Clone)]
pub struct MemFacility {
    kind: FacilityKind,
    area: AreaId,
    state: Arc<Mutex<FallbackStore>>,
    /// When set, every operation fails. Models hosts that expose the
    /// interface but throw on use.
    broken: bool,
    /// When set, inserting a new key beyond this many entries fails
    /// with `QuotaExceeded`. Overwrites are always allowed.
    quota: Option<usize>,
}

impl MemFacility {
    /// A working facility of the given kind.
    pub fn working(kind: FacilityKind) -> Self {
        Self {
            kind,
            area: AreaId::next(),
            state: Arc::new(Mutex::new(FallbackStore::new())),
            broken: false,
            quota: None,
        }
    }

    /// A facility that throws on every invocation.
    pub fn broken(kind: FacilityKind) -> Self {
        Self {
            broken: true,
            ..Self::working(kind)
        }
    }

    /// A working facility that refuses new keys past `max_entries`.
    pub fn with_quota(kind: FacilityKind, max_entries: usize) -> Self {
        Self {
            quota: Some(max_entries),
            ..Self::working(kind)
        }
    }

    /// Write directly into the underlying area, bypassing any adapter.
    ///
    /// Models a mutation performed by another execution context; pair
    /// it with a [`HostNotification`] dispatched through the hub.
    pub fn write_from_elsewhere(&self, key: &str, value: &str) {
        self.state.lock().unwrap().set_item(key, value);
    }

    /// Remove directly from the underlying area, bypassing any adapter.
    ///
    /// The removal counterpart of [`MemFacility::write_from_elsewhere`].
    pub fn remove_from_elsewhere(&self, key: &str) {
        self.state.lock().unwrap().remove_item(key);
    }

    fn check(&self) -> Result<()> {
        if self.broken {
            Err(StoreError::AccessDenied(format!(
                "{} facility is unusable",
                self.kind
            )))
        } else {
            Ok(())
        }
    }
}

impl Facility for MemFacility {
    fn kind(&self) -> FacilityKind {
        self.kind
    }

    fn area(&self) -> AreaId {
        self.area
    }

    fn length(&self) -> usize {
        self.state.lock().unwrap().length()
    }

    fn key(&self, index: usize) -> Option<String> {
        self.state.lock().unwrap().key(index)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.state.lock().unwrap().get_item(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if let Some(max) = self.quota {
            if state.index(key).is_none() && state.length() >= max {
                return Err(StoreError::QuotaExceeded);
            }
        }
        state.set_item(key, value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.check()?;
        self.state.lock().unwrap().remove_item(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check()?;
        self.state.lock().unwrap().clear();
        Ok(())
    }
}

/// A host serving preconfigured facilities.
///
/// `None` for a kind models a host with no such facility at all.
#[derive(Default)]
pub struct TestHost {
    pub durable: Option<MemFacility>,
    pub session: Option<MemFacility>,
}

impl TestHost {
    /// A host with a working facility of each kind.
    pub fn working() -> Self {
        Self {
            durable: Some(MemFacility::working(FacilityKind::Durable)),
            session: Some(MemFacility::working(FacilityKind::Session)),
        }
    }

    /// A host offering no facilities.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Host for TestHost {
    fn open_facility(&self, kind: FacilityKind) -> Option<Box<dyn Facility>> {
        let facility = match kind {
            FacilityKind::Durable => self.durable.as_ref(),
            FacilityKind::Session => self.session.as_ref(),
        };
        facility.map(|f| Box::new(f.clone()) as Box<dyn Facility>)
    }
}

/// Collects every change event delivered to an adapter.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<ChangeEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe this recorder to an adapter.
    pub fn attach(&self, adapter: &StorageAdapter) {
        let sink = self.events.clone();
        adapter.add_listener(move |event| sink.lock().unwrap().push(event.clone()));
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// A clock pinned at the given Unix millisecond.
    pub fn at(millis: i64) -> Self {
        Self {
            now: AtomicI64::new(millis),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Move forward by a delta.
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A runtime over a fully working test host, with the facilities kept
/// at hand so tests can reach behind the adapters.
pub struct TestFixture {
    pub runtime: StorageRuntime,
    pub durable_facility: MemFacility,
    pub session_facility: MemFacility,
}

impl TestFixture {
    /// A fixture whose adapters both run on working host facilities.
    pub fn new() -> Self {
        let host = TestHost::working();
        let durable_facility = host.durable.clone().expect("working host has durable");
        let session_facility = host.session.clone().expect("working host has session");
        Self {
            runtime: StorageRuntime::new(&host),
            durable_facility,
            session_facility,
        }
    }

    /// Simulate another context mutating the durable area: apply the
    /// write or removal behind the adapters, then dispatch the host
    /// notification.
    pub fn durable_change_from_elsewhere(&self, key: &str, old: Option<&str>, new: Option<&str>) {
        match new {
            Some(new) => self.durable_facility.write_from_elsewhere(key, new),
            None => self.durable_facility.remove_from_elsewhere(key),
        }
        self.runtime.hub().dispatch(&HostNotification {
            key: Some(key.to_owned()),
            old_value: old.map(str::to_owned),
            new_value: new.map(str::to_owned),
            area: self.durable_facility.area(),
        });
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
