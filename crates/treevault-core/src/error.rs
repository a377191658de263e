//! Unified application error types for TreeVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Errors reported by the backend carry
//! the `detail` string of its problem-detail payload so callers can surface
//! the backend's own wording to the user.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// An internal error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The backend could not be reached or the connection failed mid-request.
    Transport,
    /// The backend answered with an error status not covered above.
    ExternalService,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Transport => write!(f, "TRANSPORT"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

impl ErrorKind {
    /// Map an HTTP status code returned by the backend to an error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::ExternalService,
        }
    }
}

/// The unified application error used throughout TreeVault.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// The `detail` field of the backend's problem payload, when one was sent.
    pub detail: Option<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the backend-provided detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// The message to show a user: the backend's detail when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.detail.as_deref() {
            Some(detail) if !detail.trim().is_empty() => detail.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            detail: self.detail.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = AppError::validation("HTTP 400").with_detail("Node name is required");
        assert_eq!(err.user_message("Failed to create node"), "Node name is required");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = AppError::transport("connection refused");
        assert_eq!(err.user_message("Failed to load tree"), "Failed to load tree");

        let blank = AppError::validation("HTTP 400").with_detail("  ");
        assert_eq!(blank.user_message("Failed to add tag"), "Failed to add tag");
    }

    #[test]
    fn test_from_status() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ExternalService);
    }

    #[test]
    fn test_clone_keeps_detail() {
        let err = AppError::conflict("HTTP 409").with_detail("Duplicate name");
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Conflict);
        assert_eq!(cloned.detail.as_deref(), Some("Duplicate name"));
        assert_eq!(cloned.to_string(), "CONFLICT: HTTP 409");
    }
}
