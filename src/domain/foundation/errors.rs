//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable machine-readable error codes, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Load errors
    MalformedBank,

    // Session errors
    SessionNotFound,
    StaleAction,
    UnknownAction,

    // Selection errors
    SelectionLimitExceeded,
    SelectionCountInvalid,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MalformedBank => "MALFORMED_BANK",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::StaleAction => "STALE_ACTION",
            ErrorCode::UnknownAction => "UNKNOWN_ACTION",
            ErrorCode::SelectionLimitExceeded => "SELECTION_LIMIT_EXCEEDED",
            ErrorCode::SelectionCountInvalid => "SELECTION_COUNT_INVALID",
        };
        write!(f, "{}", s)
    }
}
