//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.
//! Generation itself cannot fail on a validated configuration; what remains
//! are startup problems (configuration) and transport failures, both fatal.

use thiserror::Error;
use tracing::error;

use crate::publish::PublishError;
use crate::types::ConfigValidationError;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration could not be used to build a component
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Configuration failed its range checks
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigValidationError),

    /// A stream rejected a payload or the transport failed
    #[error("Publish failed: {0}")]
    PublishError(#[from] PublishError),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) | SimulationError::InvalidConfiguration(_) => {
                "Configuration"
            }
            SimulationError::PublishError(_) => "Publish",
        }
    }

    /// Log the error at error level with its category and return it
    pub fn logged(self) -> Self {
        error!(category = self.category(), "{}", self);
        self
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = SimulationError::configuration_error("Invalid config");
        assert!(matches!(config_error, SimulationError::ConfigurationError(_)));
        assert_eq!(config_error.to_string(), "Configuration validation failed: Invalid config");
    }

    #[test]
    fn test_error_from_validation_error() {
        let error: SimulationError = ConfigValidationError::TooFewLocations(1).into();
        assert!(matches!(error, SimulationError::InvalidConfiguration(_)));
        assert_eq!(error.category(), "Configuration");
        assert!(error.to_string().contains("At least 2 locations"));
    }

    #[test]
    fn test_error_from_publish_error() {
        let error: SimulationError = PublishError::RecordTooLarge {
            stream: "truck_data".to_string(),
            size: 2048,
            limit: 1024,
        }
        .into();
        assert_eq!(error.category(), "Publish");
        assert!(error.to_string().contains("truck_data"));
    }

    #[test]
    fn test_logged_returns_the_same_error() {
        let error = SimulationError::from(ConfigValidationError::EmptyLocationName).logged();
        assert!(matches!(
            error,
            SimulationError::InvalidConfiguration(ConfigValidationError::EmptyLocationName)
        ));
    }

    #[test]
    fn test_simulation_result_type() {
        let success: SimulationResult<i32> = Ok(42);
        assert!(matches!(success, Ok(42)));

        let failure: SimulationResult<i32> = Err(SimulationError::configuration_error("Test"));
        assert!(failure.is_err());
    }
}
