//! Error types for Graph access.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Graph error code reported for expired or invalid access tokens.
pub const INVALID_AUTHENTICATION_TOKEN: &str = "InvalidAuthenticationToken";

/// Errors that can occur while talking to Microsoft Graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The access token was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Graph returned a structured error body.
    #[error("graph error {code}: {message}")]
    Api {
        /// Graph error code.
        code: String,
        /// Human readable message.
        message: String,
    },

    /// Non-success status without a parsable error body.
    #[error("unexpected HTTP status {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The fetch did not finish within its deadline.
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// A fetch worker panicked or was cancelled.
    #[error("fetch worker failed: {0}")]
    Join(String),
}

impl GraphError {
    /// Returns true when the caller should re-authenticate.
    pub fn is_auth_error(&self) -> bool {
        match self {
            GraphError::Unauthorized(_) => true,
            GraphError::Api { code, .. } => code == INVALID_AUTHENTICATION_TOKEN,
            _ => false,
        }
    }

    /// Maps a non-success response to an error.
    ///
    /// Graph wraps failures in `{"error": {"code": ..., "message": ...}}`.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let ErrorBody { code, message } = envelope.error;
                if code == INVALID_AUTHENTICATION_TOKEN || status == 401 {
                    GraphError::Unauthorized(if message.is_empty() { code } else { message })
                } else {
                    GraphError::Api { code, message }
                }
            }
            Err(_) if status == 401 => GraphError::Unauthorized(body.to_string()),
            Err(_) => GraphError::Http {
                status,
                body: body.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for GraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GraphError::Decode(err.to_string())
        } else {
            GraphError::Transport(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for GraphError {
    fn from(err: tokio::task::JoinError) -> Self {
        GraphError::Join(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// Result type for Graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
