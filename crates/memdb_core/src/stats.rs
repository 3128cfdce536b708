//! Session statistics.
//!
//! Counters for the operations a [`Session`](crate::Session) has served.
//!
//! # Usage
//!
//! ```rust
//! use memdb_core::Session;
//!
//! let mut session = Session::new();
//! session.set("a", "foo");
//! let _ = session.get("a");
//!
//! let stats = session.stats().snapshot();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! ```

use std::cell::Cell;

/// Live operation counters for one session.
///
/// Counters use interior mutability so that read-only operations such as
/// GET and COUNT can record themselves through `&self`. A session is a
/// single-threaded handle, so plain cells suffice.
#[derive(Debug, Default)]
pub struct SessionStats {
    // Point operations
    /// Number of GET operations.
    gets: Cell<u64>,
    /// Number of SET operations.
    sets: Cell<u64>,
    /// Number of DELETE operations.
    deletes: Cell<u64>,
    /// Number of COUNT operations.
    counts: Cell<u64>,

    // Transaction lifecycle
    /// Number of layers pushed by BEGIN.
    begins: Cell<u64>,
    /// Number of COMMIT calls that had something to commit.
    commits: Cell<u64>,
    /// Number of layers popped by ROLLBACK.
    rollbacks: Cell<u64>,
    /// Number of ROLLBACK calls with no open transaction.
    failed_rollbacks: Cell<u64>,
    /// Deepest nesting reached.
    max_depth: Cell<u64>,
}

impl SessionStats {
    /// Creates a zeroed stats instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_get(&self) {
        bump(&self.gets);
    }

    pub(crate) fn record_set(&self) {
        bump(&self.sets);
    }

    pub(crate) fn record_delete(&self) {
        bump(&self.deletes);
    }

    pub(crate) fn record_count(&self) {
        bump(&self.counts);
    }

    /// Records a BEGIN that brought the stack to `depth`.
    pub(crate) fn record_begin(&self, depth: usize) {
        bump(&self.begins);
        let depth = depth as u64;
        if depth > self.max_depth.get() {
            self.max_depth.set(depth);
        }
    }

    pub(crate) fn record_commit(&self) {
        bump(&self.commits);
    }

    pub(crate) fn record_rollback(&self) {
        bump(&self.rollbacks);
    }

    pub(crate) fn record_failed_rollback(&self) {
        bump(&self.failed_rollbacks);
    }

    // === Getter methods (public API) ===

    /// Returns the number of GET operations.
    pub fn gets(&self) -> u64 {
        self.gets.get()
    }

    /// Returns the number of SET operations.
    pub fn sets(&self) -> u64 {
        self.sets.get()
    }

    /// Returns the number of DELETE operations.
    pub fn deletes(&self) -> u64 {
        self.deletes.get()
    }

    /// Returns the number of COUNT operations.
    pub fn counts(&self) -> u64 {
        self.counts.get()
    }

    /// Returns the number of transactions begun.
    pub fn begins(&self) -> u64 {
        self.begins.get()
    }

    /// Returns the number of effective commits.
    pub fn commits(&self) -> u64 {
        self.commits.get()
    }

    /// Returns the number of transactions rolled back.
    pub fn rollbacks(&self) -> u64 {
        self.rollbacks.get()
    }

    /// Returns the number of rollbacks rejected for lack of a transaction.
    pub fn failed_rollbacks(&self) -> u64 {
        self.failed_rollbacks.get()
    }

    /// Returns the deepest nesting reached.
    pub fn max_depth(&self) -> u64 {
        self.max_depth.get()
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets(),
            sets: self.sets(),
            deletes: self.deletes(),
            counts: self.counts(),
            begins: self.begins(),
            commits: self.commits(),
            rollbacks: self.rollbacks(),
            failed_rollbacks: self.failed_rollbacks(),
            max_depth: self.max_depth(),
        }
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get().saturating_add(1));
}

/// A point-in-time copy of [`SessionStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Number of GET operations.
    pub gets: u64,
    /// Number of SET operations.
    pub sets: u64,
    /// Number of DELETE operations.
    pub deletes: u64,
    /// Number of COUNT operations.
    pub counts: u64,
    /// Number of transactions begun.
    pub begins: u64,
    /// Number of effective commits.
    pub commits: u64,
    /// Number of transactions rolled back.
    pub rollbacks: u64,
    /// Number of rollbacks rejected for lack of a transaction.
    pub failed_rollbacks: u64,
    /// Deepest nesting reached.
    pub max_depth: u64,
}
