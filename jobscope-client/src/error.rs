use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use validator::ValidationErrors;

/// Message used when a failed envelope carries no `msg`.
pub const FALLBACK_MESSAGE: &str = "Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to build request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("request rejected before sending: {0}")]
    Intercepted(String),
    #[error("invalid request parameters: {0}")]
    Validate(#[from] ValidationErrors),
    #[error("request timed out after {timeout:?}")]
    Timeout {
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },
    #[error("server answered with HTTP {status}")]
    Status {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),
    /// The server answered with an envelope whose `code` is not 200.
    #[error("{msg}")]
    Api { code: i32, msg: String },
}

impl ApiError {
    /// Business code of a failed envelope.
    pub fn code(&self) -> Option<i32> {
        match self {
            ApiError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Text suitable for showing to a user; never empty.
    pub fn message(&self) -> String {
        match self {
            ApiError::Api { msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// True for failures that happened below the envelope: connection,
    /// status, timeout and body decoding problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout { .. }
                | ApiError::Status { .. }
                | ApiError::Transport(_)
                | ApiError::Decode(_)
        )
    }
}
