//! Property-based test generators using proptest.
//!
//! Names and values are drawn from small alphabets so that random
//! sequences overwrite, share values and revisit variables often.

use proptest::prelude::*;

/// A single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// `set(name, value)`
    Set {
        /// Variable name
        name: String,
        /// Value
        value: String,
    },
    /// `get(name)`
    Get {
        /// Variable name
        name: String,
    },
    /// `unset(name)`
    Unset {
        /// Variable name
        name: String,
    },
    /// `count_equal_to(value)`
    Count {
        /// Value
        value: String,
    },
    /// `begin()`
    Begin,
    /// `rollback()`
    Rollback,
    /// `commit_all()`
    Commit,
}

impl StoreOp {
    /// Renders the operation as a protocol command line.
    pub fn to_command_line(&self) -> String {
        match self {
            Self::Set { name, value } => format!("SET {name} {value}"),
            Self::Get { name } => format!("GET {name}"),
            Self::Unset { name } => format!("UNSET {name}"),
            Self::Count { value } => format!("NUMEQUALTO {value}"),
            Self::Begin => "BEGIN".to_string(),
            Self::Rollback => "ROLLBACK".to_string(),
            Self::Commit => "COMMIT".to_string(),
        }
    }
}

/// Strategy for generating variable names from a small pool.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f]").expect("Invalid regex")
}

/// Strategy for generating values from a small pool.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-4]").expect("Invalid regex")
}

/// Strategy for generating a single operation.
///
/// Writes are weighted above transaction commands so blocks accumulate
/// history before they are closed.
pub fn op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (name_strategy(), value_strategy())
            .prop_map(|(name, value)| StoreOp::Set { name, value }),
        2 => name_strategy().prop_map(|name| StoreOp::Unset { name }),
        2 => name_strategy().prop_map(|name| StoreOp::Get { name }),
        2 => value_strategy().prop_map(|value| StoreOp::Count { value }),
        2 => Just(StoreOp::Begin),
        2 => Just(StoreOp::Rollback),
        1 => Just(StoreOp::Commit),
    ]
}

/// Strategy for generating a sequence of up to `max_len` operations.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(op_strategy(), 0..max_len)
}
