//! Per-cluster tuple evaluation.

use tracing::debug;

use crate::domain::Station;

use super::{
    ClusterEvaluationResult, TupleSearchConfig, generate_tuples, greedy_select_exclusive_tuples,
    partition_by_status,
};

/// Runs the tuple search for one cluster at a time.
#[derive(Debug, Clone, Default)]
pub struct TupleClusterEvaluator {
    config: TupleSearchConfig,
}

impl TupleClusterEvaluator {
    pub fn new(config: TupleSearchConfig) -> Self {
        Self { config }
    }

    /// Find the best station-disjoint transfer tuples within `cluster`.
    ///
    /// Members are station positions in `stations`. A cluster without both
    /// surplus and deficit stations yields an empty result.
    pub fn evaluate_cluster(
        &self,
        cluster: &[usize],
        stations: &[Station],
    ) -> ClusterEvaluationResult {
        let (surplus, deficit) = partition_by_status(stations, cluster);
        if surplus.is_empty() || deficit.is_empty() {
            debug!(
                members = cluster.len(),
                surplus = surplus.len(),
                deficit = deficit.len(),
                "nothing to exchange in cluster"
            );
            return ClusterEvaluationResult::empty();
        }

        let candidates = generate_tuples(stations, &surplus, &deficit, &self.config);
        let selected = greedy_select_exclusive_tuples(candidates);
        let result = ClusterEvaluationResult::from_selected(selected);

        debug!(
            members = cluster.len(),
            tuples = result.tuples.len(),
            delta_udf = result.delta_udf,
            "cluster evaluated"
        );
        result
    }
}
