//! Store configuration.

use crate::error::{CoreError, CoreResult};

/// Configuration for a transactional store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum variable name length in bytes (`None` = unbounded).
    pub max_name_len: Option<usize>,

    /// Maximum value length in bytes (`None` = unbounded).
    pub max_value_len: Option<usize>,

    /// Whether count-index entries are dropped when they reach zero.
    pub prune_zero_counts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_name_len: None,
            max_value_len: None,
            prune_zero_counts: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum variable name length.
    #[must_use]
    pub const fn max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = Some(len);
        self
    }

    /// Sets the maximum value length.
    #[must_use]
    pub const fn max_value_len(mut self, len: usize) -> Self {
        self.max_value_len = Some(len);
        self
    }

    /// Sets whether zero counts are pruned from the value index.
    #[must_use]
    pub const fn prune_zero_counts(mut self, value: bool) -> Self {
        self.prune_zero_counts = value;
        self
    }

    /// Validates a variable name.
    ///
    /// An empty name stands in for a missing identifier and is always
    /// rejected.
    pub fn check_name(&self, name: &str) -> CoreResult<()> {
        if name.is_empty() {
            return Err(CoreError::invalid_argument(
                "variable name must not be empty",
            ));
        }
        if let Some(limit) = self.max_name_len {
            if name.len() > limit {
                return Err(CoreError::invalid_argument(format!(
                    "variable name is {} bytes, limit is {limit}",
                    name.len()
                )));
            }
        }
        Ok(())
    }

    /// Validates a value. Any string within the length limit is accepted,
    /// including the empty string.
    pub fn check_value(&self, value: &str) -> CoreResult<()> {
        match self.max_value_len {
            Some(limit) if value.len() > limit => Err(CoreError::invalid_argument(format!(
                "value is {} bytes, limit is {limit}",
                value.len()
            ))),
            _ => Ok(()),
        }
    }
}
