// ABOUTME: Unified error handling for the auth service bootstrap
// ABOUTME: Defines error codes, the AppError type, and the AppResult alias

//! # Unified Error Handling
//!
//! Centralized error types for the bootstrap. Every failure surfaced to the
//! startup sequence is an [`AppError`] carrying an [`ErrorCode`], so the
//! bootstrap binary can abort with a meaningful diagnostic and exit code
//! instead of propagating an opaque panic.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Startup prerequisites (1000-1999)
    /// Required seed data (e.g. the ADMIN role) is absent from the store
    #[serde(rename = "MISSING_PREREQUISITE")]
    MissingPrerequisite = 1000,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
}

impl ErrorCode {
    /// Process exit code the bootstrap binary uses when aborting on this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            // Misconfigured environment: the operator must fix the deployment
            Self::MissingPrerequisite => 3,
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid => 2,
            Self::InvalidInput
            | Self::ResourceNotFound
            | Self::ResourceAlreadyExists
            | Self::InternalError
            | Self::DatabaseError => 1,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MissingPrerequisite => "A required startup prerequisite is missing",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }
}

/// Unified error type for the bootstrap
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Required seed data is absent from the store (fatal at startup)
    pub fn missing_prerequisite(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingPrerequisite, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceAlreadyExists,
            format!("{} already exists", resource.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration is missing
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Conversion from `anyhow::Error` (used by the database layer) to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_exit_code() {
        assert_eq!(ErrorCode::MissingPrerequisite.exit_code(), 3);
        assert_eq!(ErrorCode::ConfigMissing.exit_code(), 2);
        assert_eq!(ErrorCode::DatabaseError.exit_code(), 1);
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::missing_prerequisite("role ADMIN absent from catalog");
        assert_eq!(error.code, ErrorCode::MissingPrerequisite);
        assert!(error.to_string().contains("role ADMIN absent"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::MissingPrerequisite).unwrap();
        assert_eq!(json, "\"MISSING_PREREQUISITE\"");
    }

    #[test]
    fn test_error_chaining() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = AppError::database("insert failed").with_source(io_err);
        assert!(std::error::Error::source(&error).is_some());
    }
}
