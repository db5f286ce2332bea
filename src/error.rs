//! Error handling for the Codehub client

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Unified error type for the Codehub client
#[derive(Error, Debug)]
pub enum Error {
    /// No response was received (connection refused, DNS failure, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status other than 404
    #[error("Request failed with status {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// The backend reported the requested resource as absent
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The response body could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// A required field was missing before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], kept in serializable view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Status,
    NotFound,
    Decode,
    Validation,
    Config,
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new decode error
    pub fn decode<T: fmt::Display>(msg: T) -> Self {
        Error::Decode(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Build the error for a non-2xx response from its status and raw body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = backend_message(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body.to_string()
            }
        });

        if status == StatusCode::NOT_FOUND {
            Error::NotFound { message }
        } else {
            Error::Status { status, message }
        }
    }

    /// Coarse category of the error, as carried into view state
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Status { .. } => ErrorKind::Status,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Url(_) | Error::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the backend reported the target as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// The message worth showing to a user, without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            Error::Status { message, .. } | Error::NotFound { message } => message.clone(),
            Error::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Error body returned by the backend: `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Extract the backend-supplied message from an error body.
///
/// String details are returned verbatim. Request validation failures come back
/// as a list of `{loc, msg}` objects and are flattened into `field: msg` pairs.
fn backend_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;

    match parsed.detail {
        Value::String(s) => Some(s),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .map(|f| match f {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        });
                    Some(match field {
                        Some(field) => format!("{}: {}", field, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
