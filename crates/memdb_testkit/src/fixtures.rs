//! Script fixtures and session helpers.
//!
//! Provides convenience functions for driving sessions from statement text
//! and for setting up common starting states.

use memdb_core::{BaseStore, Outcome, Session, Statement};

/// Executes one line of statement text.
///
/// Returns the line the front end would print: the result of GET or COUNT,
/// the message of a parse or engine error, or `None` when the statement
/// prints nothing.
pub fn execute_line(session: &mut Session, line: &str) -> Option<String> {
    let stmt = match Statement::parse(line) {
        Ok(stmt) => stmt,
        Err(err) => return Some(err.to_string()),
    };
    match session.execute(&stmt) {
        Ok(Outcome::Value(value)) => Some(value),
        Ok(Outcome::Empty | Outcome::Terminate) => None,
        Err(err) => Some(err.to_string()),
    }
}

/// Runs a multi-line script and collects every printed line.
///
/// Blank lines are skipped. Execution stops after END.
pub fn run_script(session: &mut Session, script: &str) -> Vec<String> {
    let mut output = Vec::new();
    for line in script.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if matches!(Statement::parse(line), Ok(Statement::End)) {
            break;
        }
        output.extend(execute_line(session, line));
    }
    output
}

/// Creates a session whose committed state holds `pairs`.
pub fn session_from_pairs(pairs: &[(&str, &str)]) -> Session {
    let mut store = BaseStore::new();
    for (name, value) in pairs {
        store.set(name, value);
    }
    Session::with_store(store)
}

/// Common starting states.
pub mod scenarios {
    use super::*;

    /// Creates a session with `count` names `k0..k{count}` all holding `value`.
    pub fn uniform_session(count: usize, value: &str) -> Session {
        let mut session = Session::new();
        for i in 0..count {
            session.set(&format!("k{i}"), value);
        }
        session
    }

    /// Creates a session with `depth` open transactions, each setting the
    /// name `a` to its own depth.
    pub fn nested_session(depth: usize) -> Session {
        let mut session = Session::new();
        for level in 1..=depth {
            session.begin();
            session.set("a", &level.to_string());
        }
        session
    }
}
