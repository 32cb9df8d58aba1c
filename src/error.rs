use thiserror::Error;

/// Every failure the API client can surface to a caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response body: {0}")]
    DecodeFailure(String),

    /// Non-2xx response. Displays as the bare message so callers can show it as-is.
    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    /// Rejected locally before any request was made.
    #[error("{0}")]
    Invalid(String),

    #[error("session storage failed: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}
