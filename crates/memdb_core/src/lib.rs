//! # MemDB Core
//!
//! In-memory key-value engine with nested transactions.
//!
//! This crate provides:
//! - A committed base store with a value → names reverse index
//! - Transaction layers that shadow the store until COMMIT or ROLLBACK
//! - A [`Session`] handle owning the store and the layer stack
//! - A statement parser and executor for the textual command language
//!
//! ## Usage
//!
//! ```
//! use memdb_core::{Outcome, Session, Statement};
//!
//! let mut session = Session::new();
//! session.set("a", "foo");
//! session.begin();
//! session.delete("a");
//! assert_eq!(session.count("foo"), 0);
//! session.rollback().unwrap();
//! assert_eq!(session.count("foo"), 1);
//!
//! let stmt = Statement::parse("GET a").unwrap();
//! assert_eq!(session.execute(&stmt).unwrap(), Outcome::Value("foo".to_string()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod stats;
mod statement;
mod store;
mod transaction;
mod types;

pub use error::{CoreError, CoreResult};
pub use statement::{Operation, ParseError, Statement};
pub use stats::{SessionStats, StatsSnapshot};
pub use store::BaseStore;
pub use transaction::{Layer, Lookup, Outcome, Session};
pub use types::{NameSet, NULL_VALUE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
