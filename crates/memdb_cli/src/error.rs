//! Error types for the MemDB front end.

use memdb_core::{CoreError, ParseError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for front-end operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a front-end command.
///
/// Statement failures are normally printed and the loop continues; they only
/// become a `CliError` in fail-fast mode.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The statistics report could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A script file could not be opened.
    #[error("cannot open script {path:?}: {source}")]
    Script {
        /// The script path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A statement could not be parsed (fail-fast mode).
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Underlying error.
        source: ParseError,
    },

    /// A statement failed in the engine (fail-fast mode).
    #[error("line {line}: {source}")]
    Core {
        /// 1-based line number.
        line: usize,
        /// Underlying error.
        source: CoreError,
    },
}
