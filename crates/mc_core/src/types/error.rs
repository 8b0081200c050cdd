//! Error types for Monte Carlo simulation.
//!
//! All inputs are validated once, when [`SimulationParameters`](super::SimulationParameters)
//! are built. Anything that goes wrong after that point is a numeric domain
//! violation (for example a non-positive trajectory value) and is reported
//! instead of being propagated as NaN.

use thiserror::Error;

/// Categorised simulation errors.
///
/// # Variants
/// - `InvalidParameter`: A precondition on an input parameter was violated
/// - `NumericDomain`: A computed value fell outside its mathematical domain
/// - `SampleCountMismatch`: A reduction received a different number of samples than configured
///
/// # Examples
/// ```
/// use mc_core::types::SimulationError;
///
/// let err = SimulationError::invalid_parameter("spot", "must be positive, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'spot': must be positive, got -1"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// A computed value left its valid domain (e.g. log of a non-positive price).
    #[error("Numeric domain error in {context}: value = {value}")]
    NumericDomain {
        /// Where the value was produced.
        context: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The number of aggregated samples differs from the configured sample count.
    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch {
        /// Configured sample count (M).
        expected: usize,
        /// Number of samples actually supplied.
        actual: usize,
    },
}

impl SimulationError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create a numeric domain error
    pub fn numeric_domain(context: &'static str, value: f64) -> Self {
        Self::NumericDomain { context, value }
    }
}

/// Result alias used throughout the simulation crates.
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = SimulationError::invalid_parameter("volatility", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'volatility': must be positive, got 0"
        );
    }

    #[test]
    fn test_numeric_domain_display() {
        let err = SimulationError::numeric_domain("trajectory", -0.5);
        assert_eq!(
            err.to_string(),
            "Numeric domain error in trajectory: value = -0.5"
        );
    }

    #[test]
    fn test_sample_count_mismatch_display() {
        let err = SimulationError::SampleCountMismatch {
            expected: 100,
            actual: 99,
        };
        assert!(err.to_string().contains("expected 100, got 99"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SimulationError::numeric_domain("payoff", f64::NAN);
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = SimulationError::invalid_parameter("n_steps", "must be at least 1");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
