//! Typed error hierarchy for the machineq crate.
//!
//! Two failure families are kept apart on purpose:
//! - `MqError::Auth` covers token acquisition at the identity endpoint only.
//! - `MqError::Api` covers classified errors from the resource API. The
//!   `ApiErrorKind` tag is derived from the remote status code carried in the
//!   response body when present, otherwise from the HTTP status.
//!
//! Transport and JSON failures get their own variants so callers can tell a
//! network outage from a business error.

use std::fmt;

use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Unified error type for all machineq operations.
#[derive(Debug, thiserror::Error)]
pub enum MqError {
    /// Failure while obtaining an access token.
    ///
    /// Covers non-200 responses from the token endpoint (including HTTP 429
    /// rate limiting), malformed token responses, transport failures reaching
    /// the identity host, and an empty token after a refresh.
    #[error("authentication failed: {message}")]
    Auth {
        /// Human-readable description, including status and body text when
        /// the token endpoint answered.
        message: String,
        /// HTTP status returned by the token endpoint, if it answered at all.
        status: Option<StatusCode>,
        /// The underlying transport or parse error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The resource API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A request body could not be serialized, or a response body did not
    /// match the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport-level failure on an API call (DNS, TCP, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MqError {
    pub(crate) fn auth(message: impl Into<String>) -> Self {
        MqError::Auth {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Returns the classified API error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            MqError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Shorthand for `self.api().map(ApiError::kind)`.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        self.api().map(ApiError::kind)
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, MqError>;

/// Category of a classified API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Remote code 3 or HTTP 400: the request body or parameters were rejected.
    Validation,
    /// Remote code 5 or HTTP 404.
    NotFound,
    /// Remote code 7 or HTTP 403: the credentials lack access to the resource.
    PermissionDenied,
    /// Never produced by the built-in tables (remote code 3 maps to
    /// `Validation`), kept for callers that construct errors themselves.
    InvalidArgument,
    /// Not produced by the built-in tables either; a rejected token surfaces
    /// as `Unauthorized`.
    Unauthenticated,
    /// Remote code 16 or HTTP 401. Not retried with a fresh token.
    Unauthorized,
    /// Remote code 13 or HTTP 500.
    Internal,
    /// Remote code 14 or HTTP 503. Callers decide whether to back off and retry.
    Unavailable,
    /// HTTP 429 from the resource API. Rate limiting at the token endpoint is
    /// an `MqError::Auth` instead.
    RateLimited,
    /// Fallback when neither the remote code nor the HTTP status is mapped.
    Generic,
}

impl ApiErrorKind {
    /// Maps a gRPC-style status code from a response body.
    pub fn from_remote_code(code: i64) -> Option<Self> {
        match code {
            3 => Some(ApiErrorKind::Validation),
            5 => Some(ApiErrorKind::NotFound),
            7 => Some(ApiErrorKind::PermissionDenied),
            13 => Some(ApiErrorKind::Internal),
            14 => Some(ApiErrorKind::Unavailable),
            16 => Some(ApiErrorKind::Unauthorized),
            _ => None,
        }
    }

    /// Maps an HTTP status when the body carries no remote code.
    pub fn from_http_status(status: StatusCode) -> Option<Self> {
        match status.as_u16() {
            400 => Some(ApiErrorKind::Validation),
            401 => Some(ApiErrorKind::Unauthorized),
            403 => Some(ApiErrorKind::PermissionDenied),
            404 => Some(ApiErrorKind::NotFound),
            429 => Some(ApiErrorKind::RateLimited),
            500 => Some(ApiErrorKind::Internal),
            503 => Some(ApiErrorKind::Unavailable),
            _ => None,
        }
    }

    /// Picks the error kind for a response. A remote code always wins over
    /// the HTTP status, even when the code itself is unmapped.
    pub fn classify(code: Option<i64>, status: Option<StatusCode>) -> Self {
        match (code, status) {
            (Some(code), _) => Self::from_remote_code(code),
            (None, Some(status)) => Self::from_http_status(status),
            (None, None) => None,
        }
        .unwrap_or(ApiErrorKind::Generic)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::Validation => "validation error",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::PermissionDenied => "permission denied",
            ApiErrorKind::InvalidArgument => "invalid argument",
            ApiErrorKind::Unauthenticated => "unauthenticated",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::Internal => "internal server error",
            ApiErrorKind::Unavailable => "service unavailable",
            ApiErrorKind::RateLimited => "rate limited",
            ApiErrorKind::Generic => "API error",
        };
        f.write_str(name)
    }
}

/// An error reported by the MachineQ resource API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    code: Option<i64>,
    details: Vec<Value>,
    status: Option<StatusCode>,
}

impl ApiError {
    /// Builds an error with an explicit kind, bypassing classification.
    ///
    /// Mostly useful for callers that wrap the client and want to report
    /// their own failures through the same type.
    pub fn new(
        kind: ApiErrorKind,
        message: impl Into<String>,
        code: Option<i64>,
        details: Vec<Value>,
        status: Option<StatusCode>,
    ) -> Self {
        ApiError {
            kind,
            message: message.into(),
            code,
            details,
            status,
        }
    }

    /// Builds an error from a decoded error body of the form
    /// `{"code": 5, "message": "...", "details": [...]}`.
    ///
    /// Missing fields default to `"Unknown error"`, no code, and no details.
    /// A `code` that is not an integer is ignored for classification.
    pub fn from_body(body: &Map<String, Value>, status: Option<StatusCode>) -> Self {
        let message = match body.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "Unknown error".to_string(),
            Some(other) => other.to_string(),
        };
        let code = body.get("code").and_then(Value::as_i64);
        let details = body
            .get("details")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        ApiError {
            kind: ApiErrorKind::classify(code, status),
            message,
            code,
            details,
            status,
        }
    }

    /// The classified category, see [`ApiErrorKind::classify`].
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// The service's `message`, or `"Unknown error"` when it sent none.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Remote status code from the body, or the HTTP status for bodies that
    /// were not JSON.
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Free-form `details` entries, e.g. per-field validation failures.
    /// Empty when the body had none.
    pub fn details(&self) -> &[Value] {
        &self.details
    }

    /// HTTP status of the response. Kept separately from [`code`](Self::code)
    /// because the remote code may disagree with it.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}
