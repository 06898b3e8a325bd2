//! Instance file error types.

use std::path::PathBuf;

use crate::domain::DomainError;
use crate::error::ConfigError;

/// Errors that can occur when reading or writing an instance file.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    /// Reading or writing the file failed
    #[error("instance file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a valid instance
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A station record failed validation
    #[error("station record {index}: {source}")]
    InvalidStation {
        index: usize,
        #[source]
        source: DomainError,
    },

    /// The instance lists no stations
    #[error("instance has no stations")]
    NoStations,

    /// Parameters are out of range
    #[error("invalid parameters: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InstanceError::Io {
            path: PathBuf::from("/tmp/network.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "instance file /tmp/network.json: not found");

        let err = InstanceError::InvalidStation {
            index: 2,
            source: DomainError::ReservedDepotId,
        };
        assert!(err.to_string().starts_with("station record 2: "));

        let err = InstanceError::NoStations;
        assert_eq!(err.to_string(), "instance has no stations");

        let err = InstanceError::from(ConfigError::NoClusters);
        assert_eq!(err.to_string(), "invalid parameters: cluster count must be at least 1");
    }
}
