use thiserror::Error;

/// Message shown for any failure that never produced an HTTP response.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Check your internet connection and try again.";

/// Typed failure returned by every API client call.
///
/// Retries are fully contained in the client: callers only ever see the
/// final error of a call, never the intermediate ones.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 4xx: the request itself is wrong. Never retried.
    #[error("{message} (HTTP {status})")]
    Client { status: u16, message: String },

    /// Any other non-2xx response. Assumed transient.
    #[error("{message} (HTTP {status})")]
    Server { status: u16, message: String },

    /// Connection refused, DNS failure, timeout: no response at all.
    #[error("{message}")]
    Network { message: String, detail: String },

    /// A 2xx response whose body was not the expected JSON.
    #[error("failed to decode response for {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request body that could not be serialized. Never sent.
    #[error("failed to encode request body for {operation}: {source}")]
    Encode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request that cannot be built, such as a malformed base URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classifies a non-2xx response. An empty body falls back to `HTTP <status>`.
    pub fn from_status(status: u16, body: Option<String>) -> Self {
        let message = body
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));

        if (400..500).contains(&status) {
            ApiError::Client { status, message }
        } else {
            ApiError::Server { status, message }
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        ApiError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            detail: detail.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ApiError::InvalidRequest(reason.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// Server and network failures are retried. Client errors, bad
    /// requests and undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Server { .. } | ApiError::Network { .. })
    }

    /// The user-facing message, without the status suffix.
    pub fn message(&self) -> String {
        match self {
            ApiError::Client { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Network { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}

/// Raised when a score falls outside the 1-10 scale.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("score {0} is outside the 1-10 scale")]
pub struct ScoreError(pub i64);
