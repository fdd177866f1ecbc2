//! Error types for wayfare.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol and input validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for wayfare operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, HTTP).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing or rejected tokens).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-success responses from the API or token endpoint).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors, raised synchronously at construction time.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this is an invalid-argument error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential has no refresh token to exchange.
    #[error("no refresh token available")]
    RefreshTokenMissing,

    /// The token endpoint rejected the refresh token.
    #[error("refresh token invalid")]
    RefreshTokenInvalid,

    /// The session's authentication mode cannot be refreshed.
    #[error("authentication mode does not support refresh")]
    NotRefreshable,
}

/// Protocol-level errors from API responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code, if present.
    pub code: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.code.as_deref() == Some("unauthorized")
            || self.code.as_deref() == Some("invalid_token")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A required constructor argument was not supplied.
    #[error("missing required argument '{name}'")]
    MissingArgument { name: &'static str },

    /// Both a credential and a server token were supplied.
    #[error("a session uses either a credential or a server token, not both")]
    ConflictingAuthModes,

    /// Invalid base URL.
    #[error("invalid URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// Invalid client identifier.
    #[error("invalid client id: {reason}")]
    ClientId { reason: String },

    /// A value cannot be carried in an HTTP header.
    #[error("invalid header value for '{header}'")]
    HeaderValue { header: &'static str },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_code_and_message() {
        let err = ProtocolError::new(
            403,
            Some("forbidden".to_string()),
            Some("scope missing".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 403 [forbidden]: scope missing");
    }

    #[test]
    fn protocol_error_detects_auth_failures() {
        assert!(ProtocolError::new(401, None, None).is_auth_error());
        assert!(ProtocolError::new(400, Some("invalid_token".into()), None).is_auth_error());
        assert!(!ProtocolError::new(404, None, None).is_auth_error());
    }

    #[test]
    fn missing_argument_is_invalid_input() {
        let err: Error = InvalidInputError::MissingArgument {
            name: "credential",
        }
        .into();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("credential"));
    }
}
