//! Domain and store error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure reported by a persistence backend.
///
/// Detail strings are for logs only and must never reach a caller's payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend returned a record the caller could not interpret.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Domain-level rejection.
///
/// Each variant is a rejection kind carrying its caller-facing message.
/// Operations keep the kind internally and render to envelope status +
/// message only at the boundary, so tests assert on the kind rather than
/// on exact text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller input failed validation (empty/missing required fields).
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials/token.
    #[error("{0}")]
    Unauthenticated(String),

    /// A referenced entity is absent.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    AlreadyExists(String),

    /// The target is protected and may not be removed.
    #[error("{0}")]
    Protected(String),

    /// The persistence layer failed.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn protected(msg: impl Into<String>) -> Self {
        Self::Protected(msg.into())
    }
}
