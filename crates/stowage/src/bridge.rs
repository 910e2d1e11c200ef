//! Cross-context change notification bridge.
//!
//! Hosts deliver one global notification stream per process, covering
//! every storage area. The hub fans a notification out only to the
//! adapter whose backer area matches, so the durable adapter never sees
//! the session adapter's traffic and vice versa. Adapters attach at
//! construction, exactly once, and only when their probe succeeded;
//! a fallback store is private and can never change under its adapter.

use std::sync::{Mutex, Weak};

use stowage_store::AreaId;

use crate::adapter::StorageAdapter;

/// A host-level storage change notification.
///
/// The host shape carries the originating storage area alongside the
/// mutation itself; the hub uses the area for routing and the adapter
/// re-emits the rest as a normalized [`ChangeEvent`].
///
/// [`ChangeEvent`]: crate::events::ChangeEvent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNotification {
    /// The mutated key, or `None` for a whole-area reset.
    pub key: Option<String>,
    /// Value before the mutation, if any.
    pub old_value: Option<String>,
    /// Value after the mutation, if any.
    pub new_value: Option<String>,
    /// Identity of the storage area the mutation happened in.
    pub area: AreaId,
}

/// Routes host notifications to the adapters they concern.
///
/// Attachments are weak: the hub never keeps an adapter alive, and a
/// dropped adapter is pruned on the next dispatch.
#[derive(Default)]
pub struct NotificationHub {
    taps: Mutex<Vec<(AreaId, Weak<StorageAdapter>)>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an adapter for notifications concerning `area`.
    pub(crate) fn attach(&self, area: AreaId, adapter: Weak<StorageAdapter>) {
        self.taps.lock().unwrap().push((area, adapter));
    }

    /// Deliver a host notification to the matching adapter, if any.
    ///
    /// Notifications for an area no adapter is attached to are dropped,
    /// as are attachments whose adapter has been dropped.
    pub fn dispatch(&self, note: &HostNotification) {
        let mut taps = self.taps.lock().unwrap();
        taps.retain(|(_, weak)| weak.strong_count() > 0);
        let matching: Vec<_> = taps
            .iter()
            .filter(|(area, _)| *area == note.area)
            .filter_map(|(_, weak)| weak.upgrade())
            .collect();
        drop(taps);

        for adapter in matching {
            adapter.forward_host_change(note);
        }
    }
}
