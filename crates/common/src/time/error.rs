//! Errors raised by time values and their collaborators.

use std::time::Duration;

use thiserror::Error;

use crate::error::{CommonError, ErrorClassification, ErrorSeverity};

/// Result alias for time operations
pub type TimeResult<T> = Result<T, TimeError>;

/// Error type for time value operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// An argument is outside the domain of the operation (e.g. a zero
    /// denominator).
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: &'static str, message: String },

    /// The seconds field cannot hold the result.
    #[error("Seconds overflow during {operation}")]
    Overflow { operation: &'static str },

    /// The calendar cannot represent the given epoch seconds.
    #[error("Epoch seconds {seconds} are outside the supported calendar range")]
    OutOfRange { seconds: i64 },

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl TimeError {
    /// Create an invalid argument error
    pub fn invalid_argument<M: Into<String>>(argument: &'static str, message: M) -> Self {
        Self::InvalidArgument { argument, message: message.into() }
    }

    /// Create an overflow error for the named operation
    pub fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }
}

impl ErrorClassification for TimeError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Common(e) => e.is_retryable(),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument { .. } => ErrorSeverity::Error,
            Self::Overflow { .. } => ErrorSeverity::Error,
            Self::OutOfRange { .. } => ErrorSeverity::Warning,
            Self::Common(e) => e.severity(),
        }
    }

    fn is_critical(&self) -> bool {
        match self {
            Self::Common(e) => e.is_critical(),
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Common(e) => e.retry_after(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = TimeError::invalid_argument("denominator", "must be non-zero");
        assert_eq!(err.to_string(), "Invalid argument 'denominator': must be non-zero");
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_common_error_is_transparent() {
        let err = TimeError::from(CommonError::config("unreadable"));
        assert_eq!(err.to_string(), "Configuration error: unreadable");
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(!err.is_critical());
    }

    #[test]
    fn test_out_of_range_is_warning() {
        let err = TimeError::OutOfRange { seconds: i64::MAX };
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.to_string().contains(&i64::MAX.to_string()));
        assert_eq!(err.retry_after(), None);
    }
}
