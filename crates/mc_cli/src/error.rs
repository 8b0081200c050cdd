//! Error types for the mc-validate CLI.

use mc_core::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulation rejected its inputs or hit a numeric domain error
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_error_converts() {
        let err: CliError = SimulationError::invalid_parameter("spot", "must be positive").into();
        assert!(matches!(err, CliError::Simulation(_)));
        assert!(err.to_string().contains("spot"));
    }

    #[test]
    fn test_config_error_display() {
        let err: CliError = ConfigError::Validation(vec!["asian.spot: bad".to_string()]).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Validation errors: asian.spot: bad"
        );
    }
}
