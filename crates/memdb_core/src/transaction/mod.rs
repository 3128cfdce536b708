//! Nested transactions.
//!
//! A [`Session`] owns the base store and a stack of [`Layer`]s, one per open
//! transaction:
//! - **Visibility**: reads consult the innermost layer first and fall through
//!   towards the base store.
//! - **COMMIT**: folds every open layer into the base store at once.
//! - **ROLLBACK**: discards the innermost layer only.

mod layer;
mod session;

pub use layer::{Layer, Lookup};
pub use session::{Outcome, Session};
