//! # MemDB Testkit
//!
//! Test utilities for MemDB.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A brute-force reference model to check sessions against
//! - Script fixtures for scenario tests
//!
//! ## Usage
//!
//! ```rust
//! use memdb_testkit::prelude::*;
//! use memdb_core::Session;
//!
//! let mut session = Session::new();
//! let output = run_script(&mut session, "SET a foo\nCOUNT foo");
//! assert_eq!(output, ["1"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod oracle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::oracle::*;
}

pub use fixtures::*;
pub use generators::*;
pub use oracle::*;
