//! Flat per-station export records.

use serde::Serialize;
use tracing::warn;

use crate::domain::Station;

use super::RebalancePlan;

/// One clustered station, ready for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    /// Position of the station in the input list.
    pub station: usize,
    pub latitude: f64,
    pub longitude: f64,
    /// Cluster number, starting at 1.
    pub cluster: usize,
    pub current_inventory: u32,
    pub optimal_inventory: u32,
    /// `current - optimal`.
    pub inventory_difference: i64,
    pub bcrf: f64,
}

impl ExportRow {
    pub fn new(station_index: usize, station: &Station, cluster: usize) -> Self {
        let coordinate = station.coordinate();
        Self {
            station: station_index,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            cluster,
            current_inventory: station.current_inventory(),
            optimal_inventory: station.optimal_inventory(),
            inventory_difference: station.inventory_difference(),
            bcrf: station.bcrf(),
        }
    }
}

impl RebalancePlan {
    /// One row per clustered station, ordered by cluster then membership.
    ///
    /// `stations` must be the list the plan was computed from.
    pub fn export_rows(&self, stations: &[Station]) -> Vec<ExportRow> {
        let mut rows = Vec::with_capacity(self.station_count());

        for cluster in &self.clusters {
            for &i in &cluster.members {
                match stations.get(i) {
                    Some(station) => rows.push(ExportRow::new(i, station, cluster.slot + 1)),
                    None => warn!(station = i, "exported member out of range, skipped"),
                }
            }
        }

        rows
    }
}
