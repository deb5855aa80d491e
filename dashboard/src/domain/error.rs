//! Console-facing error type.
//!
//! Every failure the console reports carries a category, a message for the
//! user and, for form failures, the per-field messages as JSON details.

use serde_json::Value;
use thiserror::Error;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The command is malformed or its input fails validation.
    InvalidRequest,
    /// The credentials were refused.
    Unauthorized,
    /// No entity has the requested identifier.
    NotFound,
    /// The backend rejected the operation.
    ServiceUnavailable,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub const fn summary(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Sign-in refused",
            Self::NotFound => "Not found",
            Self::ServiceUnavailable => "Service unavailable",
        }
    }
}

/// Error reported by the console session.
///
/// # Examples
/// ```
/// use dashboard::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Product 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "Product 7 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Error {
    /// Error in `code`'s category. A blank `message` is replaced by
    /// [`ErrorCode::summary`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let text = message.into();
        Self {
            code,
            message: if text.trim().is_empty() {
                code.summary().to_owned()
            } else {
                text
            },
            details: None,
        }
    }

    /// Failure category.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message shown to the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Structured details, such as `{"fields": {...}}` for form failures.
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// [`ErrorCode::InvalidRequest`] error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::Unauthorized`] error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// [`ErrorCode::NotFound`] error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::ServiceUnavailable`] error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }
}
