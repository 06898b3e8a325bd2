//! Per-cluster inventory summary.

use serde::Serialize;
use tracing::warn;

use crate::domain::{Station, StationStatus};

/// Inventory picture of one cluster.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ClusterSummary {
    pub surplus: usize,
    pub deficit: usize,
    pub balanced: usize,

    /// Sum of `|current - optimal|` over all members.
    pub total_abs_difference: u64,

    /// Mean BCRF of the members; 0 for an empty cluster.
    pub average_bcrf: f64,
}

impl ClusterSummary {
    /// Summarize the stations at positions `members`.
    pub fn from_members(stations: &[Station], members: &[usize]) -> Self {
        let mut summary = Self::default();
        let mut bcrf_total = 0.0;
        let mut counted = 0usize;

        for &i in members {
            let Some(station) = stations.get(i) else {
                warn!(station = i, "summary member out of range, skipped");
                continue;
            };

            match station.status() {
                StationStatus::Surplus => summary.surplus += 1,
                StationStatus::Deficit => summary.deficit += 1,
                StationStatus::Balanced => summary.balanced += 1,
            }
            summary.total_abs_difference += station.inventory_difference().unsigned_abs();
            bcrf_total += station.bcrf();
            counted += 1;
        }

        if counted > 0 {
            summary.average_bcrf = bcrf_total / counted as f64;
        }
        summary
    }

    /// Number of stations counted.
    pub fn members(&self) -> usize {
        self.surplus + self.deficit + self.balanced
    }
}
