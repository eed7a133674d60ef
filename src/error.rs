use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    ProcessingError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ProcessingError => "PROCESSING_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Errors returned to callers of the board service.
///
/// `Display` only shows the caller-facing message; `detail` keeps the
/// underlying cause for diagnostics.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Processing { message: String, detail: String },

    #[error("{message}")]
    Internal { message: String, detail: String },
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::Processing {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::Processing { .. } => ErrorCode::ProcessingError,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::Validation { message }
            | Self::Processing { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Processing { detail, .. } | Self::Internal { detail, .. } => Some(detail),
            Self::NotFound { .. } | Self::Validation { .. } => None,
        }
    }
}
