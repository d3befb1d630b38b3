//! Error taxonomy for the review API client.

use thiserror::Error;

/// How a review API call failed.
///
/// `Network` covers transport problems (unreachable host, timeout, malformed
/// body) and is what the poll loop turns into the connection-lost banner.
/// `Api` is an application-level refusal: the server answered, set
/// `success:false`, and may have supplied a message worth showing verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Api(String),
}

impl ApiError {
    /// Builds an `Api` error from an optional server-supplied message,
    /// falling back to a generic string when the envelope had none.
    pub fn from_envelope(message: Option<String>) -> Self {
        ApiError::Api(message.unwrap_or_else(|| "request failed".to_owned()))
    }

    /// True for transport-level failures (banner-worthy during polling).
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Message suitable for a toast: the server's own words when present,
    /// a generic network line otherwise.
    pub fn toast_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error".to_owned(),
            ApiError::Api(msg) => msg.clone(),
        }
    }
}
