//! Domain-level error type shared by every workflow.
//!
//! Errors are transport agnostic. The HTTP adapter maps [`ErrorCode`] to a
//! status code and redacts server-side failures before they leave the
//! process.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request body could not be read.
    InvalidRequest,
    /// One or more fields failed validation; details carry a field map.
    ValidationFailed,
    /// The user directory rejected the lookup and its verdict is relayed.
    UpstreamRejected,
    /// The requested resource does not exist.
    NotFound,
    /// A backing service is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected failure inside this service or a dependency.
    InternalError,
}

/// Domain error payload.
///
/// Construction captures the trace identifier in scope, if any, so error
/// responses correlate with request logs automatically.
///
/// # Examples
/// ```
/// use diver_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("agency 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip)]
    upstream_status: Option<u16>,
}

impl Error {
    /// Create an error with the given category and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
            upstream_status: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Correlation identifier captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details for clients.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// HTTP status reported by the user directory when relaying its verdict.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        self.upstream_status
    }

    /// Attach a trace identifier explicitly.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use diver_service::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad body").with_details(json!({"line": 1}));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Relay a user-directory rejection with the status it reported.
    pub fn upstream_rejected(status: u16, message: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorCode::UpstreamRejected, message);
        error.upstream_status = Some(status);
        error
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Field-keyed messages carried by a validation failure.
    #[must_use]
    pub fn field_message(&self, field: &str) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("fields"))
            .and_then(|fields| fields.get(field))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
