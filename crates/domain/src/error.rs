//! Domain error types.

use events::DispatchError;
use thiserror::Error;

/// Failures of the primary store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be reached.
    #[error("Primary store unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be mapped back to the domain.
    #[error("Corrupted record: {0}")]
    Corrupted(String),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A lookup by id or discriminator found nothing.
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// A uniqueness invariant would be violated.
    #[error("{resource} with {field} '{value}' already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Caller-supplied input failed a precondition.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The acting user may not perform the operation.
    #[error("Not allowed: {0}")]
    NotAllowed(String),

    /// The primary store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A subscriber failed after the write was committed.
    #[error("Event dispatch error: {0}")]
    EventDispatch(#[from] DispatchError),
}

/// Coarse error category, for callers that only switch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    NotAllowed,
    Storage,
    EventDispatch,
}

impl DomainError {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        DomainError::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn conflict(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        DomainError::Conflict {
            resource,
            field,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::NotAllowed(_) => ErrorKind::NotAllowed,
            DomainError::Storage(_) => ErrorKind::Storage,
            DomainError::EventDispatch(_) => ErrorKind::EventDispatch,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
