//! Error types for MemDB core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in MemDB core operations.
///
/// Reads are total (an unknown name reads as NULL, an unknown value counts
/// zero), so the only failing operation is a ROLLBACK with nothing to undo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// ROLLBACK was issued with no open transaction.
    #[error("TRANSACTION NOT FOUND")]
    TransactionNotFound,
}
