//! Library error type

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the vehicle data API on failed requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "exveErrorId", default)]
    pub error_id: Option<String>,
    #[serde(rename = "exveErrorMsg", default)]
    pub message: Option<String>,
    #[serde(rename = "exveErrorRef", default)]
    pub reference: Option<String>,
}

impl ErrorResponse {
    /// True when none of the known fields were present
    pub fn is_empty(&self) -> bool {
        self.error_id.is_none() && self.message.is_none() && self.reference.is_none()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_id, &self.message) {
            (Some(id), Some(msg)) => write!(f, "{id}: {msg}"),
            (Some(id), None) => write!(f, "{id}"),
            (None, Some(msg)) => write!(f, "{msg}"),
            (None, None) => write!(f, "no error details"),
        }
    }
}

/// Errors returned by the client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response could not be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API request failed: {status}{}", status_detail(.body))]
    Status {
        status: StatusCode,
        body: Option<ErrorResponse>,
    },

    /// The response body does not have the expected shape
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("vehicle id must not be empty")]
    MissingVehicleId,

    #[error("resource name must not be empty")]
    MissingResourceName,

    /// `.` and `..` would be resolved away instead of sent
    #[error("path segment {0:?} is not allowed")]
    InvalidPathSegment(String),

    #[error("base URL must have a trailing slash, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }
}

fn status_detail(body: &Option<ErrorResponse>) -> String {
    match body {
        Some(body) if !body.is_empty() => format!(" ({body})"),
        _ => String::new(),
    }
}
