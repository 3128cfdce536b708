//! Committed base store.

use crate::types::{index_insert, index_remove, NameSet, ReverseIndex};
use std::collections::HashMap;

/// The committed key-value map plus its value → names reverse index.
///
/// The base store is the root of every visibility chain: transaction layers
/// fall through to it for any name they do not mention.
///
/// ## Invariant
///
/// For every `(name, value)` in the forward map, `name` belongs to the
/// reverse bucket of `value` and to no other bucket. Buckets are never empty.
///
/// # Example
///
/// ```rust
/// use memdb_core::BaseStore;
///
/// let mut store = BaseStore::new();
/// store.set("a", "foo");
/// store.set("b", "foo");
/// assert_eq!(store.count("foo"), 2);
///
/// store.set("b", "bar");
/// assert_eq!(store.count("foo"), 1);
/// assert_eq!(store.get("b"), Some("bar"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct BaseStore {
    forward: HashMap<String, String>,
    reverse: ReverseIndex,
}

impl BaseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.forward.get(name).map(String::as_str)
    }

    /// Upserts `name`. Setting the value it already holds is a no-op.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.forward.get_mut(name) {
            Some(old) if *old == value => return,
            Some(old) => {
                debug_assert!(
                    self.reverse.get(old.as_str()).is_some_and(|n| n.contains(name)),
                    "{name} missing from reverse bucket {old}"
                );
                index_remove(&mut self.reverse, old, name);
                value.clone_into(old);
            }
            None => {
                self.forward.insert(name.to_string(), value.to_string());
            }
        }
        index_insert(&mut self.reverse, value, name);
        debug_assert!(self.indexed_under(name, value));
    }

    /// Removes `name`. Deleting an absent name is a no-op.
    pub fn delete(&mut self, name: &str) {
        if let Some(old) = self.forward.remove(name) {
            debug_assert!(
                self.indexed_under(name, &old),
                "{name} missing from reverse bucket {old}"
            );
            index_remove(&mut self.reverse, &old, name);
            debug_assert!(!self.indexed_under(name, &old));
        }
    }

    fn indexed_under(&self, name: &str, value: &str) -> bool {
        self.reverse.get(value).is_some_and(|names| names.contains(name))
    }

    /// Returns how many names hold `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.reverse.get(value).map_or(0, NameSet::len)
    }

    /// Returns the names holding `value`, or `None` if no name does.
    #[must_use]
    pub fn names_holding(&self, value: &str) -> Option<&NameSet> {
        self.reverse.get(value)
    }

    /// Returns the number of committed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if nothing is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates over committed `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Checks the forward/reverse consistency invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let indexed: usize = self.reverse.values().map(NameSet::len).sum();
        indexed == self.forward.len()
            && self.reverse.values().all(|names| !names.is_empty())
            && self.forward.iter().all(|(name, value)| {
                self.reverse
                    .get(value)
                    .is_some_and(|names| names.contains(name))
            })
    }
}
