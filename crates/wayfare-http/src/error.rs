//! Mapping transport and response failures onto the core error type.

use serde::Deserialize;
use wayfare_core::Error;
use wayfare_core::error::{ProtocolError, TransportError};

/// Error body shape shared by the API (`code`/`message`) and the OAuth2
/// token endpoint (`error`/`error_description`). Either pair may be present,
/// or both.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ErrorBody {
    /// API `code`, falling back to the OAuth2 `error`.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().or(self.error.as_deref())
    }

    /// API `message`, falling back to the OAuth2 `error_description`.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error_description.as_deref())
    }

    fn into_protocol_error(self, status: u16) -> ProtocolError {
        ProtocolError::new(
            status,
            self.code().map(str::to_string),
            self.message().map(str::to_string),
        )
    }
}

pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// Parse a non-success response into a protocol error.
pub(crate) async fn protocol_error(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    response
        .json::<ErrorBody>()
        .await
        .unwrap_or_default()
        .into_protocol_error(status)
}
