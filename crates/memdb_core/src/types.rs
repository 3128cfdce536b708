//! Shared type definitions.

use std::collections::{HashMap, HashSet};

/// Textual marker returned by GET for an absent name.
///
/// A stored value literally equal to `NULL` reads back identically; the two
/// cases cannot be told apart from the output alone.
pub const NULL_VALUE: &str = "NULL";

/// A set of names, as held by a reverse-index bucket.
pub type NameSet = HashSet<String>;

/// Value → names reverse index.
pub(crate) type ReverseIndex = HashMap<String, NameSet>;

/// Adds `name` to the bucket for `value`.
pub(crate) fn index_insert(index: &mut ReverseIndex, value: &str, name: &str) {
    index
        .entry(value.to_string())
        .or_default()
        .insert(name.to_string());
}

/// Removes `name` from the bucket for `value`, dropping the bucket once empty.
pub(crate) fn index_remove(index: &mut ReverseIndex, value: &str, name: &str) {
    if let Some(names) = index.get_mut(value) {
        names.remove(name);
        if names.is_empty() {
            index.remove(value);
        }
    }
}
