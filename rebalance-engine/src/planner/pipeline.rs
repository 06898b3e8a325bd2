//! End-to-end rebalancing run.
//!
//! Scores stations, builds the composite distance matrix, clusters the
//! network and searches each cluster for transfer tuples.

use tracing::{debug, info};

use crate::clustering::{ClusteringState, KMedoids};
use crate::domain::Station;
use crate::error::ConfigError;
use crate::metric::{composite_distance_matrix, compute_bcrf};
use crate::transfer::{ClusterEvaluationResult, TupleClusterEvaluator};

use super::{ClusterSummary, PlannerConfig};

/// One cluster of the final plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCluster {
    /// Medoid slot, starting at 0.
    pub slot: usize,

    /// Medoid after the last update, if the slot kept any members.
    pub medoid: Option<usize>,

    /// Station positions assigned to this cluster.
    pub members: Vec<usize>,

    pub summary: ClusterSummary,

    /// Selected transfer tuples.
    pub evaluation: ClusterEvaluationResult,
}

/// Outcome of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct RebalancePlan {
    /// Clusters in slot order, empty slots included.
    pub clusters: Vec<PlannedCluster>,

    /// Assign/update rounds used by the clustering run.
    pub iterations: usize,

    /// Terminal clustering state.
    pub state: ClusteringState,

    /// Sum of the selected tuples' utility gain over all clusters.
    pub total_delta_udf: f64,
}

impl RebalancePlan {
    /// Number of stations placed in a cluster.
    pub fn station_count(&self) -> usize {
        self.clusters.iter().map(|c| c.members.len()).sum()
    }

    /// Total bikes moved by all selected tuples.
    pub fn units_moved(&self) -> u32 {
        self.clusters.iter().map(|c| c.evaluation.units_moved()).sum()
    }
}

/// Rebalancing planner.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Plan transfers for `stations`.
    ///
    /// `stations` must have the depot at index 0 and `travel_time_matrix`
    /// must be aligned with it. BCRF values are written back into
    /// `stations`. Fails only on an invalid configuration.
    pub fn plan(
        &self,
        stations: &mut [Station],
        travel_time_matrix: &[Vec<f64>],
    ) -> Result<RebalancePlan, ConfigError> {
        self.config.validate()?;
        let metric = &self.config.metric;

        compute_bcrf(stations, metric);
        let stations: &[Station] = stations;

        let matrix =
            composite_distance_matrix(stations, travel_time_matrix, metric.alpha, metric.beta);
        debug!(rows = matrix.len(), "composite distance matrix built");

        let outcome = KMedoids::new(stations, &matrix).run(&self.config.clustering)?;

        let evaluator = TupleClusterEvaluator::new(self.config.tuples);
        let clusters: Vec<PlannedCluster> = outcome
            .membership
            .iter()
            .enumerate()
            .map(|(slot, members)| PlannedCluster {
                slot,
                medoid: outcome.medoids.get(slot).copied().flatten(),
                members: members.to_vec(),
                summary: ClusterSummary::from_members(stations, members),
                evaluation: evaluator.evaluate_cluster(members, stations),
            })
            .collect();

        let total_delta_udf = clusters.iter().map(|c| c.evaluation.delta_udf).sum();

        info!(
            clusters = clusters.len(),
            iterations = outcome.iterations,
            state = ?outcome.state,
            total_delta_udf,
            "plan complete"
        );

        Ok(RebalancePlan {
            clusters,
            iterations: outcome.iterations,
            state: outcome.state,
            total_delta_udf,
        })
    }
}
