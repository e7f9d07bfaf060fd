//! Backend call errors

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between submitting a request and holding a
/// decoded reply
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, body stream cut short
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx status; `message` is the backend's `error` field when present
    #[error("Server error: {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// 2xx status but the body carried an `error` field
    #[error("{0}")]
    Rejected(String),

    /// 2xx status but the body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The selected upload could not be read from disk
    #[error("Could not read {path}: {reason}")]
    FileRead { path: String, reason: String },
}

impl ApiError {
    /// Message suitable for a toast: the server's own words when it gave any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(m), ..
            } => Some(m),
            ApiError::Rejected(m) => Some(m),
            _ => None,
        }
    }

    /// Detail for "Failed to ...: {detail}" toasts
    pub fn detail(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
