//! Brute-force reference model.
//!
//! [`ReferenceModel`] keeps one full copy of the visible state per open
//! transaction and answers COUNT by scanning. It is slow and obviously
//! correct, which makes it the yardstick for [`Session`].

use memdb_core::{CoreError, CoreResult, Outcome, Session, Statement, NULL_VALUE};
use std::collections::HashMap;

/// Snapshot-per-layer model of a session.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    /// Visible state per context; index 0 is the committed state.
    snapshots: Vec<HashMap<String, String>>,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self {
            snapshots: vec![HashMap::new()],
        }
    }
}

impl ReferenceModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> &HashMap<String, String> {
        self.snapshots.last().expect("committed snapshot is never popped")
    }

    fn current_mut(&mut self) -> &mut HashMap<String, String> {
        self.snapshots
            .last_mut()
            .expect("committed snapshot is never popped")
    }

    /// Returns the visible value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.current().get(name).map(String::as_str)
    }

    /// Counts visible names holding `value` by scanning every name.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.current().values().filter(|v| *v == value).count()
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// Returns the visible state.
    #[must_use]
    pub fn visible(&self) -> &HashMap<String, String> {
        self.current()
    }

    /// Applies a statement, producing what a session should produce.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionNotFound`] for a ROLLBACK with no
    /// open transaction.
    pub fn apply(&mut self, stmt: &Statement) -> CoreResult<Outcome> {
        let outcome = match stmt {
            Statement::Set { name, value } => {
                self.current_mut().insert(name.clone(), value.clone());
                Outcome::Empty
            }
            Statement::Get { name } => {
                Outcome::Value(self.get(name).unwrap_or(NULL_VALUE).to_string())
            }
            Statement::Delete { name } => {
                self.current_mut().remove(name);
                Outcome::Empty
            }
            Statement::Count { value } => Outcome::Value(self.count(value).to_string()),
            Statement::Begin => {
                let top = self.current().clone();
                self.snapshots.push(top);
                Outcome::Empty
            }
            Statement::Commit => {
                if self.depth() > 0 {
                    let top = self.snapshots.pop().unwrap_or_default();
                    self.snapshots = vec![top];
                }
                Outcome::Empty
            }
            Statement::Rollback => {
                if self.depth() == 0 {
                    return Err(CoreError::TransactionNotFound);
                }
                self.snapshots.pop();
                Outcome::Empty
            }
            Statement::End => Outcome::Terminate,
        };
        Ok(outcome)
    }
}

/// Compares a session's visible state against the model.
///
/// Every name in `names` is read through GET and every value in `values`
/// through COUNT; depth and index consistency are checked too.
///
/// # Errors
///
/// Returns a description of the first divergence.
pub fn check_session(
    session: &Session,
    model: &ReferenceModel,
    names: &[&str],
    values: &[&str],
) -> Result<(), String> {
    if session.depth() != model.depth() {
        return Err(format!(
            "depth: session {} vs model {}",
            session.depth(),
            model.depth()
        ));
    }
    for name in names {
        let (actual, expected) = (session.get(name), model.get(name));
        if actual != expected {
            return Err(format!(
                "GET {name}: session {actual:?} vs model {expected:?}"
            ));
        }
    }
    for value in values {
        let (actual, expected) = (session.count(value), model.count(value));
        if actual != expected {
            return Err(format!(
                "COUNT {value}: session {actual} vs model {expected}"
            ));
        }
    }
    if !session.is_consistent() {
        return Err("reverse index out of sync with forward map".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(model: &mut ReferenceModel, lines: &[&str]) {
        for line in lines {
            model.apply(&Statement::parse(line).unwrap()).unwrap();
        }
    }

    #[test]
    fn model_counts_by_scan() {
        let mut model = ReferenceModel::new();
        apply_all(&mut model, &["SET a foo", "SET b foo", "SET c bar"]);
        assert_eq!(model.count("foo"), 2);
        assert_eq!(model.count("bar"), 1);
    }

    #[test]
    fn model_commit_collapses_stack() {
        let mut model = ReferenceModel::new();
        apply_all(&mut model, &["BEGIN", "SET a foo", "BEGIN", "SET a bar", "COMMIT"]);
        assert_eq!(model.depth(), 0);
        assert_eq!(model.get("a"), Some("bar"));
        assert_eq!(
            model.apply(&Statement::Rollback),
            Err(CoreError::TransactionNotFound)
        );
    }

    #[test]
    fn model_rollback_restores_snapshot() {
        let mut model = ReferenceModel::new();
        apply_all(&mut model, &["SET a foo", "BEGIN", "DELETE a", "ROLLBACK"]);
        assert_eq!(model.get("a"), Some("foo"));
    }

    #[test]
    fn check_session_detects_divergence() {
        let mut session = Session::new();
        let model = ReferenceModel::new();
        session.set("a", "foo");

        let err = check_session(&session, &model, &["a"], &[]).unwrap_err();
        assert!(err.starts_with("GET a"));
    }

    #[test]
    fn check_session_accepts_matching_state() {
        let mut session = Session::new();
        let mut model = ReferenceModel::new();
        for line in ["SET a foo", "BEGIN", "SET b foo"] {
            let stmt = Statement::parse(line).unwrap();
            session.execute(&stmt).unwrap();
            model.apply(&stmt).unwrap();
        }
        assert!(check_session(&session, &model, &["a", "b"], &["foo"]).is_ok());
    }
}
