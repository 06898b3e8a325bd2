//! Clustering configuration.

use crate::error::ConfigError;

use super::SeedStrategy;

/// Configuration parameters for a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Number of medoid slots (k).
    pub clusters: usize,

    /// The run stops once no medoid moves further than this.
    pub convergence_threshold: f64,

    /// Upper bound on assign/update rounds.
    pub max_iterations: usize,

    /// How initial medoids are chosen.
    pub seed: SeedStrategy,
}

impl ClusterConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        clusters: usize,
        convergence_threshold: f64,
        max_iterations: usize,
        seed: SeedStrategy,
    ) -> Self {
        Self {
            clusters,
            convergence_threshold,
            max_iterations,
            seed,
        }
    }

    /// Default configuration with a specific cluster count.
    pub fn with_clusters(clusters: usize) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clusters == 0 {
            return Err(ConfigError::NoClusters);
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !self.convergence_threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.convergence_threshold));
        }
        Ok(())
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            clusters: 3,
            convergence_threshold: 1e-6,
            max_iterations: 1000,
            seed: SeedStrategy::Dispersion,
        }
    }
}
