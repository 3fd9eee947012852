//! Error types for agent-relay.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One itemized problem found while validating an inbound payload.
///
/// Serialized as `{"type", "loc", "msg"}` so the list can be returned to the
/// caller verbatim in a 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(kind: impl Into<String>, loc: &[&str], msg: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
        }
    }

    /// A required field is absent.
    pub fn missing(field: &str) -> Self {
        Self::new("missing", &[field], "Field required")
    }
}

/// Primary error type for all agent-relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Upstream error during {operation}: {message}")]
    Upstream { operation: String, message: String },

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad error category for choosing a transport envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Upstream,
    Configuration,
    Serialization,
    Unknown,
}

impl RelayError {
    /// Create an upstream error for a named backend operation.
    pub fn upstream(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a validation error carrying a single field problem.
    pub fn invalid_field(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Upstream { .. } | Self::Stream(_) | Self::Timeout(_) => ErrorCategory::Upstream,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Io(_) => ErrorCategory::Unknown,
        }
    }

    /// HTTP-equivalent status for this error. Only validation problems are
    /// the caller's fault.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            _ => 500,
        }
    }

    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RelayError>;
