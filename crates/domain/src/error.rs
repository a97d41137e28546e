//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A variable reference is malformed.
    #[error("invalid variable reference: {0}")]
    InvalidVariableReference(String),

    /// A template referenced a variable that no earlier case captured.
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
