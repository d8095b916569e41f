//! Price feed error types.

use thiserror::Error;

/// Errors that can occur while loading price records.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Feed could not be reached.
    #[error("Price feed unreachable: {0}")]
    Network(String),

    /// Feed answered with a non-success HTTP status.
    #[error("Price feed returned status {status}")]
    Status { status: u16 },

    /// Feed content could not be decoded into price records.
    #[error("Malformed price data: {0}")]
    Malformed(String),

    /// Local feed source could not be read.
    #[error("Failed to read price feed: {0}")]
    Io(#[from] std::io::Error),

    /// Feed source is not configured.
    #[error("Price feed not configured: {0}")]
    NotConfigured(String),
}

impl FetchError {
    /// Check if a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Status { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Result type for price feed operations.
pub type FetchResult<T> = Result<T, FetchError>;
