//! In-memory fallback store.
//!
//! Used when the host provides no usable facility. Same shape as the
//! host contract, but every operation is total and nothing persists.

/// A single stored key-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// An ordered in-memory key-value store.
///
/// Insertion order is preserved and observable through positional
/// enumeration: a new key is appended at the end, an overwrite keeps the
/// entry where it was, a removal shifts later entries down one position.
/// Keys are unique.
#[derive(Debug, Default)]
pub struct FallbackStore {
    data: Vec<Entry>,
}

impl FallbackStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Number of entries currently stored.
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Key at the given position, or `None` past the end.
    pub fn key(&self, index: usize) -> Option<String> {
        self.data.get(index).map(|e| e.key.clone())
    }

    /// Position of a key, or `None` if absent.
    pub fn index(&self, key: &str) -> Option<usize> {
        self.data.iter().position(|e| e.key == key)
    }

    /// Current value for a key, or `None` if absent.
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.index(key).map(|i| self.data[i].value.clone())
    }

    /// Insert or overwrite a value. An existing entry keeps its position.
    pub fn set_item(&mut self, key: &str, value: &str) {
        match self.index(key) {
            Some(i) => self.data[i].value = value.to_owned(),
            None => self.data.push(Entry {
                key: key.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    /// Remove a key if present; later entries shift down.
    pub fn remove_item(&mut self, key: &str) {
        if let Some(i) = self.index(key) {
            self.data.remove(i);
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
