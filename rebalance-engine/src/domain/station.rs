//! Bike-share station type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Id of the synthetic depot station that represents the network centroid.
pub const DEPOT_ID: u32 = 0;

/// Geographic position of a station.
///
/// Only used to identify stations in exported results, never for geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where a station's inventory sits relative to its optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationStatus {
    /// More bikes than optimal; can give bikes away.
    Surplus,
    /// Fewer bikes than optimal; can take bikes.
    Deficit,
    /// Exactly at the optimum.
    Balanced,
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StationStatus::Surplus => "surplus",
            StationStatus::Deficit => "deficit",
            StationStatus::Balanced => "balanced",
        };
        f.write_str(s)
    }
}

/// A bike-share station with its inventory and utility curve.
///
/// The utility curve (`udf`) maps an inventory level to the value of the
/// station's dissatisfaction function at that level, so moving a station
/// towards a lower value is a gain. The curve always holds exactly
/// `capacity + 1` entries and both inventories are at most `capacity`;
/// [`Station::udf_at`] can therefore index any level between them.
///
/// # Examples
///
/// ```
/// use rebalance_engine::domain::{Coordinate, Station, StationStatus};
///
/// let station = Station::new(
///     "s-17",
///     17,
///     Coordinate::new(51.5, -0.12),
///     4,
///     3,
///     1,
///     vec![0.0, 0.5, 1.5, 3.0, 5.0],
/// )
/// .unwrap();
///
/// assert_eq!(station.status(), StationStatus::Surplus);
/// assert_eq!(station.surplus(), 2);
///
/// // A curve that does not cover every level is rejected
/// assert!(Station::new("s-18", 18, Coordinate::default(), 4, 1, 1, vec![0.0; 4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    sys_id: String,
    id: u32,
    coordinate: Coordinate,
    capacity: u32,
    current_inventory: u32,
    optimal_inventory: u32,
    udf: Vec<f64>,
    bcrf: f64,
}

impl Station {
    /// Create a validated station.
    ///
    /// Fails if `id` is the depot id, if `udf` does not hold exactly
    /// `capacity + 1` finite values, or if either inventory exceeds capacity.
    pub fn new(
        sys_id: impl Into<String>,
        id: u32,
        coordinate: Coordinate,
        capacity: u32,
        current_inventory: u32,
        optimal_inventory: u32,
        udf: Vec<f64>,
    ) -> Result<Self, DomainError> {
        if id == DEPOT_ID {
            return Err(DomainError::ReservedDepotId);
        }

        let expected = capacity as usize + 1;
        if udf.len() != expected {
            return Err(DomainError::UdfLength {
                expected,
                actual: udf.len(),
            });
        }

        if let Some(level) = udf.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::NonFiniteUdf { level });
        }

        if current_inventory > capacity {
            return Err(DomainError::InventoryAboveCapacity {
                which: "current",
                inventory: current_inventory,
                capacity,
            });
        }

        if optimal_inventory > capacity {
            return Err(DomainError::InventoryAboveCapacity {
                which: "optimal",
                inventory: optimal_inventory,
                capacity,
            });
        }

        Ok(Self {
            sys_id: sys_id.into(),
            id,
            coordinate,
            capacity,
            current_inventory,
            optimal_inventory,
            udf,
            bcrf: 0.0,
        })
    }

    /// Create the synthetic depot placed at the network centroid.
    ///
    /// The depot is balanced with an empty capacity and takes no part in
    /// any computation.
    pub fn depot(coordinate: Coordinate) -> Self {
        Self {
            sys_id: "depot".to_string(),
            id: DEPOT_ID,
            coordinate,
            capacity: 0,
            current_inventory: 0,
            optimal_inventory: 0,
            udf: vec![0.0],
            bcrf: 0.0,
        }
    }

    pub fn sys_id(&self) -> &str {
        &self.sys_id
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns true for the synthetic depot.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT_ID
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn current_inventory(&self) -> u32 {
        self.current_inventory
    }

    pub fn optimal_inventory(&self) -> u32 {
        self.optimal_inventory
    }

    /// The full utility curve, indexed by inventory level.
    pub fn udf(&self) -> &[f64] {
        &self.udf
    }

    /// Utility curve value at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level > capacity`.
    pub fn udf_at(&self, level: u32) -> f64 {
        self.udf[level as usize]
    }

    /// Signed difference `current - optimal`.
    pub fn inventory_difference(&self) -> i64 {
        i64::from(self.current_inventory) - i64::from(self.optimal_inventory)
    }

    /// Bikes this station can give away before reaching its optimum.
    pub fn surplus(&self) -> u32 {
        self.current_inventory.saturating_sub(self.optimal_inventory)
    }

    /// Bikes this station needs to reach its optimum.
    pub fn deficit(&self) -> u32 {
        self.optimal_inventory.saturating_sub(self.current_inventory)
    }

    pub fn status(&self) -> StationStatus {
        match self.current_inventory.cmp(&self.optimal_inventory) {
            std::cmp::Ordering::Greater => StationStatus::Surplus,
            std::cmp::Ordering::Less => StationStatus::Deficit,
            std::cmp::Ordering::Equal => StationStatus::Balanced,
        }
    }

    /// Benefit-cost ratio of rebalancing, as set by the metric pass.
    pub fn bcrf(&self) -> f64 {
        self.bcrf
    }

    pub fn set_bcrf(&mut self, bcrf: f64) {
        self.bcrf = bcrf;
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} ({}/{} of {})",
            self.sys_id, self.id, self.current_inventory, self.optimal_inventory, self.capacity
        )
    }
}
