//! Core type definitions for InMemDB.

use std::fmt;

/// Number of transaction blocks currently open.
///
/// Depth zero means writes go straight to the committed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionDepth(pub usize);

impl TransactionDepth {
    /// Creates a new depth.
    #[must_use]
    pub const fn new(depth: usize) -> Self {
        Self(depth)
    }

    /// Returns the raw depth.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns true if no transaction block is open.
    #[must_use]
    pub const fn is_top_level(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TransactionDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth:{}", self.0)
    }
}
