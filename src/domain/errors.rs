//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP mapping lives in `crate::api::error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found, or not visible to the caller
    #[error("Resource not found")]
    NotFound,
    /// Input rejected, scoped to one request field
    #[error("Validation error on `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// Write refused because the row already exists
    #[error("Conflict ({code}): {message}")]
    Conflict { code: &'static str, message: String },
    /// Missing or invalid credentials
    #[error("Authentication required")]
    Unauthorized,
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        DomainError::Conflict {
            code,
            message: message.into(),
        }
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
