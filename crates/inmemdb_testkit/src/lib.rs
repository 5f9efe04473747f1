//! # InMemDB Testkit
//!
//! Test utilities for InMemDB.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A naive reference model for differential testing
//! - Store fixtures for common scenarios
//! - Invariant checks over a live store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inmemdb_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn agrees_with_model(ops in op_sequence_strategy(64)) {
//!         check_against_model(&ops);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod invariants;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::invariants::*;
    pub use crate::model::*;
    pub use proptest::prelude::*;
}

pub use fixtures::*;
pub use generators::*;
pub use invariants::*;
pub use model::*;
