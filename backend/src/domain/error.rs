//! Domain-level error types.
//!
//! [`Error`] is the single structured failure type that leaves the domain. It
//! carries a status classification ([`ErrorCode`]), a client-facing message,
//! and an optional wrapped cause kept for diagnostics. The type is transport
//! agnostic: the HTTP adapter owns the mapping from [`ErrorCode`] to a status
//! code.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::TraceId;

/// Underlying failure retained for logs and error chains.
pub type ErrorCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of failure classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request could not be decoded or is otherwise malformed.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request collides with a store-enforced uniqueness rule.
    Conflict,
    /// Anything unclassified: store outages, serialisation failures.
    InternalError,
}

impl ErrorCode {
    /// Stable snake_case label, used as a structured log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured domain error.
///
/// Built once where a failure is detected and returned unchanged up the call
/// chain. The builder methods consume `self`, so an error cannot be altered
/// once it has been handed to a caller.
///
/// `Display` renders the message followed by the cause (if any); this is the
/// form written to logs. [`Error::message`] is the client-facing part only.
///
/// # Examples
/// ```
/// use user_service::domain::{Error, ErrorCode};
///
/// let io = std::io::Error::other("socket closed");
/// let err = Error::internal("Failed to retrieve users").with_cause(io);
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.message(), "Failed to retrieve users");
/// assert_eq!(err.to_string(), "Failed to retrieve users: socket closed");
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    cause: Option<ErrorCause>,
}

impl Error {
    /// Create a new error, capturing the current trace identifier if one is
    /// in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            cause: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Wrap the underlying failure that triggered this error.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Failure classification.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message, without the cause.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// The wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests;
