//! Transaction layer state.

use crate::store::BaseStore;
use crate::types::{index_insert, index_remove, NameSet, ReverseIndex};
use std::collections::{HashMap, HashSet};

/// What a layer says about a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The layer set the name to this value.
    Updated(&'a str),
    /// The layer deleted the name.
    Deleted,
    /// The layer does not mention the name; ask the parent.
    Untouched,
}

/// One transaction's diff overlay.
///
/// A layer records the names set and deleted since its BEGIN, plus a reverse
/// index restricted to its own updates. Its parent is whatever sits directly
/// below it on the session's layer stack, or the base store for the bottom
/// layer; the layer itself never holds a reference to it.
///
/// ## Invariants
///
/// - A name is in at most one of `updates` / `deleted`.
/// - `local_reverse` mirrors `updates` exactly.
#[derive(Debug, Default, Clone)]
pub struct Layer {
    /// Names set within this layer.
    updates: HashMap<String, String>,
    /// Names deleted within this layer.
    deleted: HashSet<String>,
    /// Value → names index over `updates` only.
    local_reverse: ReverseIndex,
}

impl Layer {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `name` against this layer alone.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        if self.deleted.contains(name) {
            Lookup::Deleted
        } else if let Some(value) = self.updates.get(name) {
            Lookup::Updated(value)
        } else {
            Lookup::Untouched
        }
    }

    /// Returns true if this layer hides the parent's view of `name`.
    ///
    /// Any update counts, whatever value it targets.
    #[must_use]
    pub fn shadows(&self, name: &str) -> bool {
        self.updates.contains_key(name) || self.deleted.contains(name)
    }

    /// Records `name = value` in this layer.
    pub(crate) fn set(&mut self, name: &str, value: &str) {
        self.deleted.remove(name);
        match self.updates.get_mut(name) {
            Some(old) if *old == value => return,
            Some(old) => {
                debug_assert!(
                    self.local_reverse.get(old.as_str()).is_some_and(|n| n.contains(name)),
                    "{name} missing from local bucket {old}"
                );
                index_remove(&mut self.local_reverse, old, name);
                value.clone_into(old);
            }
            None => {
                self.updates.insert(name.to_string(), value.to_string());
            }
        }
        index_insert(&mut self.local_reverse, value, name);
        debug_assert!(
            !self.deleted.contains(name) && self.indexed_under(name, value),
            "{name} not indexed under {value} after set"
        );
    }

    /// Records the deletion of `name` in this layer.
    pub(crate) fn delete(&mut self, name: &str) {
        if let Some(old) = self.updates.remove(name) {
            index_remove(&mut self.local_reverse, &old, name);
            debug_assert!(!self.indexed_under(name, &old));
        }
        self.deleted.insert(name.to_string());
    }

    /// Drops whatever this layer recorded for `name`, so that it falls
    /// through to the parent again.
    pub(crate) fn unshadow(&mut self, name: &str) {
        if let Some(old) = self.updates.remove(name) {
            index_remove(&mut self.local_reverse, &old, name);
            debug_assert!(!self.indexed_under(name, &old));
        }
        self.deleted.remove(name);
    }

    fn indexed_under(&self, name: &str, value: &str) -> bool {
        self.local_reverse
            .get(value)
            .is_some_and(|names| names.contains(name))
    }

    /// Turns the parent's set of names holding `value` into this layer's.
    ///
    /// Every shadowed name is removed, then the names this layer itself set
    /// to `value` are added back.
    pub(crate) fn mask<'a>(&'a self, visible: &mut HashSet<&'a str>, value: &str) {
        if self.shadow_count() < visible.len() {
            for name in self.updates.keys().chain(self.deleted.iter()) {
                visible.remove(name.as_str());
            }
        } else {
            visible.retain(|name| !self.shadows(name));
        }
        if let Some(names) = self.local_reverse.get(value) {
            visible.extend(names.iter().map(String::as_str));
        }
    }

    /// Writes this layer's updates and deletions into the base store.
    pub(crate) fn apply_to(self, store: &mut BaseStore) {
        for (name, value) in &self.updates {
            store.set(name, value);
        }
        for name in &self.deleted {
            store.delete(name);
        }
    }

    /// Iterates over `(name, value)` pairs set in this layer.
    pub fn updates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.updates
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterates over names deleted in this layer.
    pub fn deletions(&self) -> impl Iterator<Item = &str> {
        self.deleted.iter().map(String::as_str)
    }

    /// Returns the number of names this layer shadows.
    #[must_use]
    pub fn shadow_count(&self) -> usize {
        self.updates.len() + self.deleted.len()
    }

    /// Returns true if the layer records nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deleted.is_empty()
    }

    /// Checks the layer invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let indexed: usize = self.local_reverse.values().map(NameSet::len).sum();
        indexed == self.updates.len()
            && self.local_reverse.values().all(|names| !names.is_empty())
            && self.updates.iter().all(|(name, value)| {
                !self.deleted.contains(name)
                    && self
                        .local_reverse
                        .get(value)
                        .is_some_and(|names| names.contains(name))
            })
    }
}
