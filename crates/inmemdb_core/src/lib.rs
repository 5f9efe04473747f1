//! # InMemDB Core
//!
//! Transactional in-memory key-value engine for InMemDB.
//!
//! This crate provides:
//! - A variable table mapping names to string values
//! - A reverse index counting how many variables hold each value
//! - Nested transaction blocks backed by per-block undo frames
//! - Rollback of the innermost block and commit of all open blocks
//! - A coarse-grained locked wrapper for sharing a store across threads
//!
//! ```rust
//! use inmemdb_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.set("a", "10")?;
//! store.begin();
//! store.set("a", "20")?;
//! assert_eq!(store.count_equal_to("20"), 1);
//! assert!(store.rollback());
//! assert_eq!(store.get("a")?, Some("10"));
//! # Ok::<(), inmemdb_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod index;
mod shared;
mod stats;
mod store;
mod types;
mod undo;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use index::ValueIndex;
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::TransactionalStore;
pub use types::TransactionDepth;
pub use undo::{PriorState, UndoFrame, UndoStack};

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
