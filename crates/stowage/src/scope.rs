//! Key scoping: stateless namespaced views over an adapter.
//!
//! A scope rewrites keys before delegating to its root adapter. The
//! first scoping level joins name and key with `-`; composing further
//! scopes prepends the new name joined with `:`. The asymmetry is part
//! of the persisted key layout: data written under the old convention
//! must keep resolving, so both separators are load-bearing.

use std::sync::Arc;

use stowage_store::Result;

use crate::adapter::StorageAdapter;

/// A namespacing view over a [`StorageAdapter`].
///
/// Holds no data and filters no events: mutations land in the root
/// adapter under the rewritten key, and change events surface there
/// with the rewritten key too.
#[derive(Clone)]
pub struct Scope {
    root: Arc<StorageAdapter>,
    name: String,
}

impl Scope {
    pub(crate) fn new(root: Arc<StorageAdapter>, name: &str) -> Self {
        Self {
            root,
            name: name.to_owned(),
        }
    }

    /// The composed namespace prefix of this view.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn child_key(&self, key: &str) -> String {
        format!("{}-{}", self.name, key)
    }

    /// Read `key` within this namespace.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.root.get_item(&self.child_key(key))
    }

    /// Write `key` within this namespace.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.root.set_item(&self.child_key(key), value)
    }

    /// Remove `key` within this namespace.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.root.remove_item(&self.child_key(key))
    }

    /// Derive a nested scope. The new prefix is `"{inner}:{outer}"`.
    pub fn scope(&self, name: &str) -> Scope {
        Scope {
            root: self.root.clone(),
            name: format!("{}:{}", name, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_rewrites_the_key() {
        let storage = StorageAdapter::detached();
        let scoped = storage.scope("scope");

        scoped.set_item("settingTest", "bar").unwrap();

        assert_eq!(
            storage.get_item("scope-settingTest").unwrap().as_deref(),
            Some("bar")
        );
    }

    #[test]
    fn getting_rewrites_the_key() {
        let storage = StorageAdapter::detached();
        storage.set_item("scope-gettingTest", "bar").unwrap();

        let scoped = storage.scope("scope");
        assert_eq!(scoped.get_item("gettingTest").unwrap().as_deref(), Some("bar"));
    }

    #[test]
    fn removing_rewrites_the_key() {
        let storage = StorageAdapter::detached();
        storage.set_item("scope-removingTest", "bar").unwrap();

        let scoped = storage.scope("scope");
        scoped.remove_item("removingTest").unwrap();

        assert_eq!(storage.get_item("scope-removingTest").unwrap(), None);
    }

    #[test]
    fn sub_scoping_composes_with_a_colon() {
        let storage = StorageAdapter::detached();
        let sub = storage.scope("scope").scope("sub");

        sub.set_item("subSetting", "bar").unwrap();

        assert_eq!(
            storage.get_item("sub:scope-subSetting").unwrap().as_deref(),
            Some("bar")
        );
    }

    #[test]
    fn deeper_nesting_keeps_prepending() {
        let storage = StorageAdapter::detached();
        let deep = storage.scope("a").scope("b").scope("c");

        assert_eq!(deep.name(), "c:b:a");

        deep.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("c:b:a-k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn scoping_works_through_a_plain_reference() {
        let storage = StorageAdapter::detached();
        let by_ref: &StorageAdapter = &storage;

        by_ref.scope("s").set_item("k", "v").unwrap();

        assert_eq!(storage.get_item("s-k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn a_scope_keeps_its_root_alive() {
        let scoped = {
            let storage = StorageAdapter::detached();
            storage.scope("s")
        };

        scoped.set_item("k", "v").unwrap();
        assert_eq!(scoped.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn events_surface_at_the_root_with_the_rewritten_key() {
        let storage = StorageAdapter::detached();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));

        let sink = seen.clone();
        storage.add_listener(move |e| sink.lock().unwrap().push(e.key.clone()));

        storage.scope("s").set_item("k", "v").unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Some("s-k".to_owned())]);
    }
}
