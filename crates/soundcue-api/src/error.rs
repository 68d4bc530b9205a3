//! Error types for backend access.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    Http {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("rate limited by {endpoint}")]
    RateLimited { endpoint: String },

    /// A response body did not have the expected shape.
    #[error("parse error from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from the catalog core.
    #[error(transparent)]
    Core(#[from] soundcue_core::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns `true` when retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Parse { .. } | Self::Core(_) | Self::Config(_) => false,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
