use thiserror::Error;

/// Fallback shown when a failure carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Failures from the user directory API.
///
/// `Display` is the single human-readable message surfaced to the user, so
/// every variant formats to plain text with no prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS backend unavailable).
    #[error("{0}")]
    Config(String),
    /// Transport failure before a response arrived (DNS, connection refused).
    #[error("{0}")]
    Network(String),
    /// No response within the configured per-request timeout.
    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// A 2xx body could not be decoded.
    #[error("{0}")]
    Parse(String),
    /// A create or update succeeded but the envelope carried no record.
    #[error("Server response did not include a user record")]
    EmptyResponse,
}

impl ApiError {
    /// Builds a transport error, falling back to the generic message when empty.
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(non_empty_or_generic(message.into()))
    }

    /// Builds a status error. Prefers the envelope's `message`, then the
    /// status-code message a plain HTTP client would report.
    pub fn status(status: u16, envelope_message: Option<String>) -> Self {
        let message = envelope_message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        ApiError::Api { status, message }
    }

    /// Maps a reqwest failure onto the taxonomy. `timeout_ms` is reported
    /// verbatim when the failure was a timeout.
    pub fn from_reqwest(error: &reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            ApiError::Timeout(timeout_ms)
        } else if error.is_decode() {
            ApiError::Parse(non_empty_or_generic(error.to_string()))
        } else if error.is_builder() {
            ApiError::Config(non_empty_or_generic(error.to_string()))
        } else {
            ApiError::network(error.to_string())
        }
    }

    /// HTTP status for server-side rejections.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn non_empty_or_generic(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
