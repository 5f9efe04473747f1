//! # InMemDB CLI
//!
//! Line-oriented command interpreter for the InMemDB transactional store.
//!
//! Each input line holds one case-insensitive command followed by
//! whitespace-separated arguments:
//!
//! | Command | Output |
//! |---|---|
//! | `SET name value` | none |
//! | `GET name` | the value, or `NULL` |
//! | `UNSET name` | none |
//! | `NUMEQUALTO value` | number of variables set to `value` |
//! | `BEGIN` | none |
//! | `ROLLBACK` | `NO TRANSACTION` if no block is open |
//! | `COMMIT` | `NO TRANSACTION` if no block is open |
//! | `END` | ends the session |
//!
//! Malformed lines produce a diagnostic on the error stream and are
//! otherwise ignored.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod report;
pub mod session;

pub use command::{Command, ParseError};
pub use error::{CliError, CliResult};
pub use report::StatsFormat;
pub use session::{open_input, Flow, RunSummary, Session};
