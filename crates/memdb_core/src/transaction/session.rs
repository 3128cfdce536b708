//! Session: the caller-owned transaction context.

use crate::error::{CoreError, CoreResult};
use crate::statement::Statement;
use crate::stats::SessionStats;
use crate::store::BaseStore;
use crate::transaction::layer::{Layer, Lookup};
use crate::types::NULL_VALUE;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Result of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Output of GET or COUNT: a value, `NULL`, or a decimal count.
    Value(String),
    /// A mutating statement succeeded; there is nothing to print.
    Empty,
    /// END was issued; the caller should shut down in an orderly way.
    Terminate,
}

/// A key-value session with nested transactions.
///
/// `Session` is the single "current transaction" handle. It owns the base
/// store and the stack of open layers, indexed by depth, and every read or
/// write targets the innermost layer (or the base store when no transaction
/// is open). Callers own their session outright; independent sessions share
/// nothing.
///
/// ## State machine
///
/// ```text
/// Base     --BEGIN-->    Layer(1)
/// Layer(n) --BEGIN-->    Layer(n+1)
/// Layer(n) --ROLLBACK--> Layer(n-1) | Base
/// Layer(n) --COMMIT-->   Base          (all n layers at once)
/// Base     --ROLLBACK--> TransactionNotFound
/// ```
///
/// # Example
///
/// ```rust
/// use memdb_core::{CoreError, Session};
///
/// let mut session = Session::new();
/// session.begin();
/// session.set("a", "foo");
/// session.begin();
/// session.set("a", "bar");
/// session.commit();
///
/// assert_eq!(session.get("a"), Some("bar"));
/// assert_eq!(session.rollback(), Err(CoreError::TransactionNotFound));
/// ```
#[derive(Debug, Default)]
pub struct Session {
    /// Committed state.
    store: BaseStore,
    /// Open transactions, outermost first.
    layers: Vec<Layer>,
    /// Operation counters.
    stats: SessionStats,
}

impl Session {
    /// Creates a session over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over an existing store.
    #[must_use]
    pub fn with_store(store: BaseStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    // === Reads ===

    /// Returns the value of `name` visible in the current context.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.stats.record_get();
        self.resolve(self.layers.len(), name)
    }

    /// Returns how many names hold `value` in the current context.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.stats.record_count();
        if self.layers.is_empty() {
            return self.store.count(value);
        }
        self.names_holding(value).len()
    }

    /// Returns the names holding `value` in the current context.
    ///
    /// Starting from the base store's reverse bucket, each open layer from
    /// the outermost inwards removes every name it shadows and adds the
    /// names it set to `value` itself.
    #[must_use]
    pub fn names_holding(&self, value: &str) -> HashSet<&str> {
        let mut visible: HashSet<&str> = self
            .store
            .names_holding(value)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        for layer in &self.layers {
            layer.mask(&mut visible, value);
        }
        visible
    }

    /// Resolves `name` as seen from the context at `depth` (0 is the base
    /// store, `n` is the n-th layer).
    fn resolve(&self, depth: usize, name: &str) -> Option<&str> {
        for layer in self.layers[..depth].iter().rev() {
            match layer.lookup(name) {
                Lookup::Updated(value) => return Some(value),
                Lookup::Deleted => return None,
                Lookup::Untouched => {}
            }
        }
        self.store.get(name)
    }

    // === Writes ===

    /// Sets `name` to `value` in the current context.
    ///
    /// Inside a transaction, a name whose parent context already holds
    /// `value` gets no shadow entry: any entry the layer had for it is
    /// dropped and the name falls through to the parent.
    pub fn set(&mut self, name: &str, value: &str) {
        self.stats.record_set();
        let depth = self.layers.len();
        trace!(name, value, depth, "set");

        if depth == 0 {
            self.store.set(name, value);
        } else {
            let inherited = self.resolve(depth - 1, name) == Some(value);
            let layer = &mut self.layers[depth - 1];
            if inherited {
                layer.unshadow(name);
            } else {
                layer.set(name, value);
            }
        }
        debug_assert_eq!(self.resolve(depth, name), Some(value));
    }

    /// Deletes `name` in the current context.
    pub fn delete(&mut self, name: &str) {
        self.stats.record_delete();
        trace!(name, depth = self.layers.len(), "delete");

        match self.layers.last_mut() {
            Some(layer) => layer.delete(name),
            None => self.store.delete(name),
        }
        debug_assert_eq!(self.resolve(self.layers.len(), name), None);
    }

    // === Transaction lifecycle ===

    /// Opens a transaction nested inside the current context.
    pub fn begin(&mut self) {
        self.layers.push(Layer::new());
        self.stats.record_begin(self.layers.len());
        debug!(depth = self.layers.len(), "transaction begun");
    }

    /// Persists every open transaction into the base store.
    ///
    /// Issued at any depth, COMMIT collapses the whole stack: layers are
    /// applied outermost first, so the innermost write to a name wins. With
    /// no open transaction this is a no-op.
    pub fn commit(&mut self) {
        if self.layers.is_empty() {
            debug!("commit with no open transaction");
            return;
        }
        let depth = self.layers.len();
        for layer in self.layers.drain(..) {
            layer.apply_to(&mut self.store);
        }
        self.stats.record_commit();
        debug!(depth, committed = self.store.len(), "transactions committed");
    }

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionNotFound`] if no transaction is open.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let Some(layer) = self.layers.pop() else {
            self.stats.record_failed_rollback();
            debug!("rollback with no open transaction");
            return Err(CoreError::TransactionNotFound);
        };
        self.stats.record_rollback();
        debug!(
            depth = self.layers.len(),
            discarded = layer.shadow_count(),
            "transaction rolled back"
        );
        Ok(())
    }

    // === Statements ===

    /// Executes one parsed statement against the current context.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionNotFound`] for a ROLLBACK with no
    /// open transaction. Every other statement succeeds.
    pub fn execute(&mut self, stmt: &Statement) -> CoreResult<Outcome> {
        let outcome = match stmt {
            Statement::Set { name, value } => {
                self.set(name, value);
                Outcome::Empty
            }
            Statement::Get { name } => {
                Outcome::Value(self.get(name).unwrap_or(NULL_VALUE).to_string())
            }
            Statement::Delete { name } => {
                self.delete(name);
                Outcome::Empty
            }
            Statement::Count { value } => Outcome::Value(self.count(value).to_string()),
            Statement::Begin => {
                self.begin();
                Outcome::Empty
            }
            Statement::Commit => {
                self.commit();
                Outcome::Empty
            }
            Statement::Rollback => {
                self.rollback()?;
                Outcome::Empty
            }
            Statement::End => Outcome::Terminate,
        };
        Ok(outcome)
    }

    // === Introspection ===

    /// Returns the number of open transactions (0 at the base store).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Returns the committed store.
    #[must_use]
    pub fn store(&self) -> &BaseStore {
        &self.store
    }

    /// Returns the open layers, outermost first.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the session's operation counters.
    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Checks the reverse-index invariants of the store and every layer.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.store.is_consistent() && self.layers.iter().all(Layer::is_consistent)
    }
}
