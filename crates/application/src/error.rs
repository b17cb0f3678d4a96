//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// User not authorized
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_service_is_retryable() {
        let err = ApplicationError::ExternalService("timeout".to_string());
        assert!(err.is_retryable());
    }

    #[test]
    fn configuration_is_not_retryable() {
        let err = ApplicationError::Configuration("no page token".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidIdentifier("x".to_string()).into();
        assert_eq!(err.to_string(), "Invalid identifier: x");
    }

    #[test]
    fn error_display() {
        let err = ApplicationError::NotFound("page 1".to_string());
        assert_eq!(err.to_string(), "Not found: page 1");
    }
}
