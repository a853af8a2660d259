//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the library and the CLI.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EloError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid placing: {reason}")]
    InvalidPlacing { reason: String },

    #[error("Scenario not found: {index}")]
    ScenarioNotFound { index: usize },
}

impl EloError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        EloError::ConfigurationError {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_placing(reason: impl Into<String>) -> Self {
        EloError::InvalidPlacing {
            reason: reason.into(),
        }
    }
}

/// Returns true when the error chain carries a [`EloError::ConfigurationError`]
pub fn is_configuration_error(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<EloError>(),
        Some(EloError::ConfigurationError { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_recognised_through_anyhow() {
        let err: anyhow::Error = EloError::configuration("Total of all win ratios > 1").into();
        assert!(is_configuration_error(&err));
        assert_eq!(
            err.to_string(),
            "Configuration error: Total of all win ratios > 1"
        );
    }

    #[test]
    fn test_other_errors_are_not_configuration_errors() {
        let err: anyhow::Error = EloError::invalid_placing("player 3 missing").into();
        assert!(!is_configuration_error(&err));

        let err = anyhow::anyhow!("plain failure");
        assert!(!is_configuration_error(&err));
    }
}
