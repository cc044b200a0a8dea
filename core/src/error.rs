//! Error types for the delivery API client.
//!
//! # Design
//! Every fetch ends in exactly one of three failures: the request never
//! completed (`Transport`), the service answered with something other than
//! 200 (`Status`), or the body did not match the expected shape (`Decode`).
//! None of them is retried. A missing resource is a plain `Status` 404;
//! `is_not_found` is the shorthand for checking it.

use thiserror::Error;

/// Errors returned by `ContentfulClient` fetch and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built or sent (bad URL, DNS, connect,
    /// timeout).
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service returned a status other than 200. The body is discarded.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// The response body could not be decoded into the requested type.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
