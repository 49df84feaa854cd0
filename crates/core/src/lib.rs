//! Shared primitives for all Rust crates in Mentor.

#![forbid(unsafe_code)]

mod reason;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use reason::ReasonCode;

/// Result type used across Mentor crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation(
                "value must not be empty or whitespace",
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
///
/// Every variant carries a stable [`ReasonCode`] so transports can render a
/// structured body without inspecting the message text.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identifier does not resolve to an existing row.
    #[error("not found: {message}")]
    NotFound {
        /// Entity-specific reason code.
        reason: ReasonCode,
        /// Human-readable message.
        message: String,
    },

    /// Malformed or semantically invalid input.
    #[error("bad request: {message}")]
    BadRequest {
        /// Stable reason code.
        reason: ReasonCode,
        /// Human-readable message.
        message: String,
    },

    /// Write would violate a referential invariant.
    #[error("conflict: {message}")]
    Conflict {
        /// Stable reason code.
        reason: ReasonCode,
        /// Human-readable message.
        message: String,
    },

    /// Internal unexpected error.
    #[error("internal error: {message}")]
    Internal {
        /// Stable reason code.
        reason: ReasonCode,
        /// Diagnostic detail. Never rendered to API callers.
        message: String,
    },
}

impl AppError {
    /// Builds a not-found error with the given reason.
    #[must_use]
    pub fn not_found(reason: ReasonCode, message: impl Into<String>) -> Self {
        Self::NotFound {
            reason,
            message: message.into(),
        }
    }

    /// Builds a bad-request error with the given reason.
    #[must_use]
    pub fn bad_request(reason: ReasonCode, message: impl Into<String>) -> Self {
        Self::BadRequest {
            reason,
            message: message.into(),
        }
    }

    /// Builds a bad-request error for generic input validation failures.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::bad_request(ReasonCode::InvalidInput, message)
    }

    /// Builds a conflict error with the given reason.
    #[must_use]
    pub fn conflict(reason: ReasonCode, message: impl Into<String>) -> Self {
        Self::Conflict {
            reason,
            message: message.into(),
        }
    }

    /// Builds an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            reason: ReasonCode::InternalError,
            message: message.into(),
        }
    }

    /// Returns the stable reason code.
    #[must_use]
    pub fn reason(&self) -> ReasonCode {
        match self {
            Self::NotFound { reason, .. }
            | Self::BadRequest { reason, .. }
            | Self::Conflict { reason, .. }
            | Self::Internal { reason, .. } => *reason,
        }
    }

    /// Returns the human-readable message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::BadRequest { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message, .. } => message.as_str(),
        }
    }
}
