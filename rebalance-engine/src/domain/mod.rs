//! Domain types for the rebalancing engine.
//!
//! A `Station` is validated at construction time: its utility curve covers
//! every inventory level up to capacity and both inventories fit inside that
//! range, so the metric, clustering and transfer layers index the curve
//! without further checks.

mod error;
mod station;

pub use error::DomainError;
pub use station::{Coordinate, DEPOT_ID, Station, StationStatus};
