//! Error types for the adaptive tutor

use thiserror::Error;

/// Main error type for the tutor
#[derive(Error, Debug)]
pub enum TutorError {
    /// Malformed construction parameters: dimensions, table shape, hyperparameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A state or action index outside the configured range
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TutorError {
    /// Build an `InvalidState` error for an index outside `[0, bound)`
    pub fn out_of_range(kind: &str, index: impl std::fmt::Display, bound: usize) -> Self {
        TutorError::InvalidState(format!("{kind} {index} outside [0, {bound})"))
    }
}

/// Result type alias for tutor operations
pub type Result<T> = std::result::Result<T, TutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = TutorError::out_of_range("state", -1, 3);
        assert!(matches!(err, TutorError::InvalidState(_)));
        assert_eq!(err.to_string(), "Invalid state: state -1 outside [0, 3)");
    }

    #[test]
    fn test_invalid_configuration_message() {
        let err = TutorError::InvalidConfiguration("learning rate 0 outside (0, 1]".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: learning rate 0 outside (0, 1]"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: TutorError = parse.unwrap_err().into();
        assert!(matches!(err, TutorError::Serialization(_)));
    }
}
