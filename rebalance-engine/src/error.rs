//! Configuration error types.
//!
//! Every configuration struct validates itself before a run starts so the
//! algorithms never have to reject their inputs halfway through.

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Loading cost per bike must be a finite, non-negative number
    #[error("loading time per bike must be finite and non-negative, got {0}")]
    InvalidLoadTime(f64),

    /// A distance weight is NaN or infinite
    #[error("distance weight {name} must be finite, got {value}")]
    NonFiniteWeight { name: &'static str, value: f64 },

    /// At least one cluster is required
    #[error("cluster count must be at least 1")]
    NoClusters,

    /// The clustering loop needs at least one iteration
    #[error("max iterations must be at least 1")]
    NoIterations,

    /// Convergence threshold is NaN or infinite
    #[error("convergence threshold must be finite, got {0}")]
    InvalidThreshold(f64),

    /// A transfer group bound is outside the supported range
    #[error("{name} must be between 1 and {max}, got {value}")]
    GroupBound {
        name: &'static str,
        value: usize,
        max: usize,
    },
}
