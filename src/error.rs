//! Error types for rule construction and configuration.
//!
//! These are precondition violations: programmer errors reported the moment a
//! rule or validator is built. They are never part of a caller's validation
//! error domain. Failed validation runs produce
//! [`ValidationFailure`](crate::failure::ValidationFailure) instead.

use thiserror::Error;

/// Main error type for rulegraph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A required argument was never supplied.
    #[error("argument '{0}' is required")]
    MissingArgument(&'static str),

    /// A value is absent but the rule does not allow null.
    #[error("argument '{0}' must not be null when null is disallowed")]
    NullValue(&'static str),

    /// A pattern failed to compile.
    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Configuration could not be read, parsed or validated.
    #[error("configuration error: {0}")]
    Config(String),

    /// A failure report could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type alias for rulegraph operations.
pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = RuleError::MissingArgument("validation_error");
        assert_eq!(err.to_string(), "argument 'validation_error' is required");

        let err = RuleError::NullValue("value");
        assert_eq!(
            err.to_string(),
            "argument 'value' must not be null when null is disallowed"
        );

        let err = RuleError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid regex pattern '(': unclosed group"
        );
    }

    #[test]
    fn config_error_wraps_message() {
        let err = RuleError::Config("failure_message must be non-empty".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: failure_message must be non-empty"
        );
    }
}
