//! Domain error types.
//!
//! These errors represent validation failures when building stations.
//! They are distinct from configuration and instance-file errors.

/// Domain-level errors for station validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Utility curve does not cover `0..=capacity`
    #[error("utility curve has {actual} entries, expected capacity + 1 = {expected}")]
    UdfLength { expected: usize, actual: usize },

    /// Utility curve contains NaN or an infinity
    #[error("utility curve value at level {level} is not finite")]
    NonFiniteUdf { level: usize },

    /// An inventory figure exceeds the station capacity
    #[error("{which} inventory {inventory} exceeds capacity {capacity}")]
    InventoryAboveCapacity {
        which: &'static str,
        inventory: u32,
        capacity: u32,
    },

    /// Id 0 belongs to the synthetic depot
    #[error("station id 0 is reserved for the depot")]
    ReservedDepotId,
}
