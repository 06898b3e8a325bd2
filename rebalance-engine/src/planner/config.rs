//! Configuration for the full planning pipeline.

use crate::clustering::ClusterConfig;
use crate::error::ConfigError;
use crate::metric::MetricParams;
use crate::transfer::TupleSearchConfig;

/// Configuration parameters for one planning run.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// Loading cost and distance weights.
    pub metric: MetricParams,

    /// Cluster count, seeding and convergence settings.
    pub clustering: ClusterConfig,

    /// Group-size bounds for transfer tuples.
    pub tuples: TupleSearchConfig,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(metric: MetricParams, clustering: ClusterConfig, tuples: TupleSearchConfig) -> Self {
        Self {
            metric,
            clustering,
            tuples,
        }
    }

    /// Check every part of the configuration.
    ///
    /// Tuple bounds are validated when the [`TupleSearchConfig`] is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.metric.validate()?;
        self.clustering.validate()
    }
}
