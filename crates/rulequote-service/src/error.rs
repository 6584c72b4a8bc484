//! # Service Error Types
//!
//! Errors raised by the service layer.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Service Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Lookup      │  │     Domain      │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Core           │  │  Config                 │ │
//! │  │  (quote / job)  │  │  (validation,   │  │  Toml                   │ │
//! │  │                 │  │   overflow)     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │   File Output   │  │  Serialization  │                              │
//! │  │                 │  │                 │                              │
//! │  │  Io             │  │  Serialize      │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rulequote_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error type.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A quote or document job does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Validation or pricing failure from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid service configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading config or writing a document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML in a config or rules file.
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl ServiceError {
    /// Creates a NotFound error for a quote.
    pub fn quote_not_found(id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: "Quote",
            id: id.into(),
        }
    }

    /// Creates a NotFound error for a document job.
    pub fn job_not_found(id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: "Document job",
            id: id.into(),
        }
    }

    /// True for lookups of ids that do not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// True when the caller sent bad input (as opposed to an internal failure).
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Core(CoreError::InvalidInput(_)))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::InvalidInput(err))
    }
}

impl From<toml::ser::Error> for ServiceError {
    fn from(err: toml::ser::Error) -> Self {
        ServiceError::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::quote_not_found("q-42");
        assert_eq!(err.to_string(), "Quote not found: q-42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error_is_classified() {
        let err: ServiceError = ValidationError::Required {
            field: "items".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid input: items is required");
    }
}
