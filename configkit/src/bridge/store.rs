//! The array-style store abstraction.

use indexmap::IndexMap;

use crate::path::CompositeKey;

/// A flat key-value store addressed by composite keys.
///
/// This is the only view the bridge needs of a Tcl interpreter: entries are
/// written with `set`, read back by name and enumerated in insertion order.
/// Values are kept in their encoded textual form.
pub trait ArrayStore {
    /// Stores `text` under `key`, replacing any previous value.
    fn set_entry(&mut self, key: CompositeKey, text: String);

    /// Returns the encoded text stored under `key`.
    fn get_entry(&self, key: &CompositeKey) -> Option<&str>;

    /// Lists every key in insertion order.
    fn list_entries(&self) -> Vec<CompositeKey>;
}

/// An [`ArrayStore`] held in memory.
///
/// Overwriting an entry keeps its original position, matching how a Tcl
/// interpreter reports variables that were `set` twice.
///
/// # Examples
///
/// ```rust
/// use configkit::{ArrayStore, CompositeKey, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set_entry(CompositeKey::from("a"), "1".to_owned());
/// store.set_entry(CompositeKey::from("b"), "2".to_owned());
/// store.set_entry(CompositeKey::from("a"), "3".to_owned());
/// assert_eq!(store.get("a"), Some("3"));
/// assert_eq!(
///     store.list_entries(),
///     vec![CompositeKey::from("a"), CompositeKey::from("b")]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: IndexMap<CompositeKey, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by its raw key text.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CompositeKey, &str)> {
        self.entries.iter().map(|(key, text)| (key, text.as_str()))
    }
}

impl ArrayStore for MemoryStore {
    fn set_entry(&mut self, key: CompositeKey, text: String) {
        self.entries.insert(key, text);
    }

    fn get_entry(&self, key: &CompositeKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn list_entries(&self) -> Vec<CompositeKey> {
        self.entries.keys().cloned().collect()
    }
}

impl FromIterator<(CompositeKey, String)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (CompositeKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(CompositeKey, String)> for MemoryStore {
    fn extend<I: IntoIterator<Item = (CompositeKey, String)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
