//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Identifier could not be interpreted
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_identifier_error_message() {
        let err = DomainError::InvalidIdentifier("abc".to_string());
        assert_eq!(err.to_string(), "Invalid identifier: abc");
    }
}
