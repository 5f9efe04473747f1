//! CLI error types.

use inmemdb_core::CoreError;
use std::io;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised while running a session.
///
/// Only `Io` ends a session. `Core` errors are reported as diagnostics by
/// [`Session::execute_line`](crate::Session::execute_line) and the loop
/// carries on.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store rejected a command.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Stats could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
