//! Error types for Network as Code operations.
//!
//! Every failure surfaced by the client crates is an [`Error`]. The variants map onto a
//! small taxonomy ([`ErrorKind`]) so callers can tell client-side validation failures,
//! authentication failures, missing resources and server faults apart.

use thiserror::Error;

/// Main error type for Network as Code operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Client-side precondition failed; no request was sent.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The API key was rejected (HTTP 401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side failure (HTTP 5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body could not be parsed into the expected representation
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request rejected as malformed (HTTP 400/422)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request conflicts with the current resource state (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Too many requests (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// HTTP request failed for another reason
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Remote service could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Network as Code operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client-side validation failure, raised before any request.
    Validation,
    /// Authentication or authorization failure.
    Auth,
    /// The requested resource does not exist.
    NotFound,
    /// Server fault or malformed server response.
    Server,
    /// Transport-level failure (connection, timeout).
    Network,
    /// Request rejected by the server as invalid.
    Client,
    /// Local configuration problem.
    Config,
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ServerError(_) => "SERVER_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimited(_) => "RATE_LIMITED",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns the taxonomy class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::Unauthorized(_) => ErrorKind::Auth,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ServerError(_) | Self::ParseError(_) => ErrorKind::Server,
            Self::HttpError(_) | Self::Timeout(_) | Self::ServiceUnavailable(_) => {
                ErrorKind::Network
            }
            Self::BadRequest(_) | Self::Conflict(_) | Self::RateLimited(_) => ErrorKind::Client,
            Self::ConfigError(_) | Self::InvalidEndpoint(_) => ErrorKind::Config,
        }
    }

    /// Returns true for 401/403 failures.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Auth)
    }

    /// Returns true for 404 failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }

    /// Returns true if this error points at a server or configuration fault worth a warning.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ServerError(_) | Self::ParseError(_) | Self::ConfigError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            Error::Unauthorized("test".to_string()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(
            Error::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            Error::ServerError("test".to_string()).error_code(),
            "SERVER_ERROR"
        );
        assert_eq!(
            Error::ParseError("test".to_string()).error_code(),
            "PARSE_ERROR"
        );
        assert_eq!(
            Error::RateLimited("test".to_string()).error_code(),
            "RATE_LIMITED"
        );
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::ValidationError("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::Unauthorized("x".into()).kind(), ErrorKind::Auth);
        assert_eq!(Error::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::ServerError("x".into()).kind(), ErrorKind::Server);
        assert_eq!(Error::ParseError("x".into()).kind(), ErrorKind::Server);
        assert_eq!(Error::Timeout("x".into()).kind(), ErrorKind::Network);
        assert_eq!(Error::Conflict("x".into()).kind(), ErrorKind::Client);
        assert_eq!(Error::ConfigError("x".into()).kind(), ErrorKind::Config);

        assert!(Error::Unauthorized("x".into()).is_auth_error());
        assert!(Error::NotFound("x".into()).is_not_found());
        assert!(!Error::ServerError("x".into()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Unauthorized("Invalid API key.".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid API key.");

        let err = Error::ValidationError("missing IP".to_string());
        assert_eq!(err.to_string(), "Validation error: missing IP");
    }

    #[test]
    fn test_should_log() {
        assert!(Error::ServerError("test".to_string()).should_log());
        assert!(Error::ParseError("test".to_string()).should_log());
        assert!(Error::ConfigError("test".to_string()).should_log());

        assert!(!Error::NotFound("test".to_string()).should_log());
        assert!(!Error::ValidationError("test".to_string()).should_log());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let nac_err: Error = err.into();
        assert!(matches!(nac_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let nac_err: Error = err.into();
        assert!(matches!(nac_err, Error::ParseError(_)));
        assert_eq!(nac_err.kind(), ErrorKind::Server);
    }

}
