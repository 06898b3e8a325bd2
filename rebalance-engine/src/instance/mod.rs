//! JSON problem instances.
//!
//! An instance is one network snapshot: planner parameters, the station
//! records and a travel-time matrix. The matrix includes the depot, so it
//! has one more row and column than there are station records; row and
//! column 0 belong to the depot.

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clustering::{ClusterConfig, SeedStrategy};
use crate::domain::{Coordinate, Station};
use crate::metric::MetricParams;
use crate::planner::PlannerConfig;
use crate::transfer::TupleSearchConfig;

pub use error::InstanceError;

/// One station as stored in an instance file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub sys_id: String,
    pub id: u32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub capacity: u32,
    pub current_inventory: u32,
    pub optimal_inventory: u32,
    /// Utility curve, one value per inventory level `0..=capacity`.
    pub udf: Vec<f64>,
}

/// Planner parameters; every field falls back to the planner default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceParams {
    pub t_load: f64,
    pub alpha: f64,
    pub beta: f64,
    pub clusters: usize,
    pub convergence_threshold: f64,
    pub max_iterations: usize,
    pub seed: SeedStrategy,
    pub max_surplus: usize,
    pub max_deficit: usize,
}

impl Default for InstanceParams {
    fn default() -> Self {
        let metric = MetricParams::default();
        let clustering = ClusterConfig::default();
        let tuples = TupleSearchConfig::default();
        Self {
            t_load: metric.t_load,
            alpha: metric.alpha,
            beta: metric.beta,
            clusters: clustering.clusters,
            convergence_threshold: clustering.convergence_threshold,
            max_iterations: clustering.max_iterations,
            seed: clustering.seed,
            max_surplus: tuples.max_surplus(),
            max_deficit: tuples.max_deficit(),
        }
    }
}

impl InstanceParams {
    /// Build and validate the planner configuration.
    pub fn planner_config(&self) -> Result<PlannerConfig, InstanceError> {
        let config = PlannerConfig::new(
            MetricParams::new(self.t_load, self.alpha, self.beta),
            ClusterConfig::new(
                self.clusters,
                self.convergence_threshold,
                self.max_iterations,
                self.seed,
            ),
            TupleSearchConfig::new(self.max_surplus, self.max_deficit)?,
        );
        config.validate()?;
        Ok(config)
    }
}

/// A network snapshot ready for planning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub params: InstanceParams,
    pub stations: Vec<StationRecord>,
    pub travel_times: Vec<Vec<f64>>,
}

impl Instance {
    /// Read an instance from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| InstanceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let instance: Instance = serde_json::from_str(&contents)?;
        debug!(
            path = %path.display(),
            stations = instance.stations.len(),
            "instance loaded"
        );
        Ok(instance)
    }

    /// Write the instance as pretty-printed JSON.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), InstanceError> {
        let path = path.as_ref();
        let io_error = |source| InstanceError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_error)
    }

    /// Validate the records and prepend the depot.
    ///
    /// The depot sits at the centroid of the station coordinates.
    pub fn stations(&self) -> Result<Vec<Station>, InstanceError> {
        if self.stations.is_empty() {
            return Err(InstanceError::NoStations);
        }

        let count = self.stations.len() as f64;
        let latitude = self.stations.iter().map(|r| r.latitude).sum::<f64>() / count;
        let longitude = self.stations.iter().map(|r| r.longitude).sum::<f64>() / count;

        let mut stations = Vec::with_capacity(self.stations.len() + 1);
        stations.push(Station::depot(Coordinate::new(latitude, longitude)));

        for (index, record) in self.stations.iter().enumerate() {
            let station = Station::new(
                record.sys_id.clone(),
                record.id,
                Coordinate::new(record.latitude, record.longitude),
                record.capacity,
                record.current_inventory,
                record.optimal_inventory,
                record.udf.clone(),
            )
            .map_err(|source| InstanceError::InvalidStation { index, source })?;
            stations.push(station);
        }

        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: u32, latitude: f64, current: u32) -> StationRecord {
        StationRecord {
            sys_id: format!("sys{id}"),
            id,
            latitude,
            longitude: -latitude,
            capacity: 4,
            current_inventory: current,
            optimal_inventory: 2,
            udf: vec![4.0, 1.0, 0.0, 1.0, 4.0],
        }
    }

    fn instance() -> Instance {
        Instance {
            params: InstanceParams::default(),
            stations: vec![record(1, 10.0, 4), record(2, 20.0, 0)],
            travel_times: vec![
                vec![0.0, 5.0, 5.0],
                vec![5.0, 0.0, 10.0],
                vec![5.0, 10.0, 0.0],
            ],
        }
    }

    #[test]
    fn save_and_load_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");

        instance().save(&path).unwrap();
        let loaded = Instance::load(&path).unwrap();

        assert_eq!(loaded, instance());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("network.json");

        instance().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Instance::load("/nonexistent/path/network.json").unwrap_err();
        assert!(matches!(err, InstanceError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"stations\": [").unwrap();

        let err = Instance::load(&path).unwrap_err();
        assert!(matches!(err, InstanceError::Json(_)));
    }

    #[test]
    fn params_default_when_omitted() {
        let json = r#"{
            "params": { "clusters": 5, "seed": "by_score" },
            "stations": [],
            "travel_times": []
        }"#;
        let instance: Instance = serde_json::from_str(json).unwrap();

        assert_eq!(instance.params.clusters, 5);
        assert_eq!(instance.params.seed, SeedStrategy::ByScore);
        assert_eq!(instance.params.t_load, 60.0);
        assert_eq!(instance.params.max_surplus, 3);
    }

    #[test]
    fn depot_at_centroid() {
        let stations = instance().stations().unwrap();

        assert_eq!(stations.len(), 3);
        assert!(stations[0].is_depot());
        assert_eq!(stations[0].sys_id(), "depot");
        assert_eq!(stations[0].coordinate(), Coordinate::new(15.0, -15.0));
        assert_eq!(stations[1].sys_id(), "sys1");
        assert_eq!(stations[2].current_inventory(), 0);
    }

    #[test]
    fn empty_instance_rejected() {
        let err = Instance::default().stations().unwrap_err();
        assert!(matches!(err, InstanceError::NoStations));
    }

    #[test]
    fn invalid_record_reports_index() {
        let mut instance = instance();
        instance.stations[1].udf.pop();

        let err = instance.stations().unwrap_err();
        assert!(matches!(err, InstanceError::InvalidStation { index: 1, .. }));
    }

    #[test]
    fn planner_config_from_params() {
        let config = InstanceParams::default().planner_config().unwrap();
        assert_eq!(config.clustering.clusters, 3);
        assert_eq!(config.tuples, TupleSearchConfig::default());

        let params = InstanceParams {
            max_deficit: 12,
            ..InstanceParams::default()
        };
        assert!(matches!(params.planner_config(), Err(InstanceError::Config(_))));

        let params = InstanceParams {
            alpha: f64::NAN,
            ..InstanceParams::default()
        };
        assert!(matches!(params.planner_config(), Err(InstanceError::Config(_))));
    }
}
