//! Service Layer Error Types
//!
//! Error types for the Fastidious API client. Remote-status classification
//! happens at the dispatch boundary, so the variants here cover only what the
//! client itself can fail on.

use thiserror::Error;

/// Fastidious API client errors
#[derive(Error, Debug)]
pub enum FastidiousError {
    /// The request never produced an HTTP response (connect, DNS, protocol)
    #[error("Request to Fastidious failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL and path did not form a valid URL
    #[error("Invalid Fastidious URL: {url}")]
    InvalidUrl { url: String },

    /// Response body could not be decoded as the expected JSON shape
    #[error("Unexpected Fastidious response: {context}")]
    UnexpectedResponse { context: String },
}

impl FastidiousError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(context: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            context: context.into(),
        }
    }
}
