//! Application error taxonomy.
//!
//! Every fallible operation in the workspace returns [`AppResult`], carrying
//! one taxonomy value plus a human-readable message. Errors are built through
//! the named constructors rather than the enum variants directly, so call
//! sites read as `AppError::not_found("room missing")`.

use thiserror::Error;

/// Convenience alias used across all crates.
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// A request failed domain validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller is not authenticated for the operation (e.g. wrong
    /// room password).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is authenticated but lacks the right to perform the
    /// operation (e.g. non-owner starting a game).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The entity being created already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The entity exists but is in a state that rejects the operation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),

    /// A downstream collaborator (store, notification transport) failed.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// A downstream collaborator is temporarily unavailable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Builds a `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds an `Unauthorized` error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Builds a `NotFound` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Builds a `Forbidden` error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Builds an `AlreadyExists` error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    /// Builds an `InvalidOperation` error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    /// Builds an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Builds an `ExternalService` error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService(message.into())
    }

    /// Builds a `ServiceUnavailable` error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Whether a bounded retry may succeed. Validation and ownership
    /// failures are deterministic and must short-circuit; only
    /// infrastructure failures qualify.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Internal(_) | Self::ExternalService(_) | Self::ServiceUnavailable(_)
        )
    }
}
