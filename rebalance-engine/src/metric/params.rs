//! Weighting parameters for the metric pass.

use crate::error::ConfigError;

/// Parameters for BCRF and composite distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricParams {
    /// Loading/unloading time per bike; the BCRF cost unit.
    pub t_load: f64,

    /// Weight of normalized travel time.
    pub alpha: f64,

    /// Weight of normalized complementarity.
    pub beta: f64,
}

impl MetricParams {
    pub fn new(t_load: f64, alpha: f64, beta: f64) -> Self {
        Self {
            t_load,
            alpha,
            beta,
        }
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.t_load.is_finite() || self.t_load < 0.0 {
            return Err(ConfigError::InvalidLoadTime(self.t_load));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            t_load: 60.0,
            alpha: 2.0,
            beta: 0.5,
        }
    }
}
