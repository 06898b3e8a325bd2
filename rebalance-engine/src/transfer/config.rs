//! Tuple search configuration.

use crate::error::ConfigError;

/// Largest group size accepted for either side of a tuple.
pub const MAX_GROUP_SIZE: usize = 9;

/// Group-size bounds for tuple generation.
///
/// Both bounds are mandatory and limited to `1..=MAX_GROUP_SIZE`; the
/// only way to build one is through [`TupleSearchConfig::new`] or
/// `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupleSearchConfig {
    max_surplus: usize,
    max_deficit: usize,
}

impl TupleSearchConfig {
    /// Create a configuration, rejecting bounds outside `1..=MAX_GROUP_SIZE`.
    pub fn new(max_surplus: usize, max_deficit: usize) -> Result<Self, ConfigError> {
        for (name, value) in [("max_surplus", max_surplus), ("max_deficit", max_deficit)] {
            if value == 0 || value > MAX_GROUP_SIZE {
                return Err(ConfigError::GroupBound {
                    name,
                    value,
                    max: MAX_GROUP_SIZE,
                });
            }
        }
        Ok(Self {
            max_surplus,
            max_deficit,
        })
    }

    /// Most surplus stations in one tuple.
    pub fn max_surplus(&self) -> usize {
        self.max_surplus
    }

    /// Most deficit stations in one tuple.
    pub fn max_deficit(&self) -> usize {
        self.max_deficit
    }
}

impl Default for TupleSearchConfig {
    fn default() -> Self {
        Self {
            max_surplus: 3,
            max_deficit: 3,
        }
    }
}
