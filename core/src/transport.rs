//! Executing `HttpRequest`s.
//!
//! # Design
//! `Transport` is the single I/O seam: one blocking GET in, one
//! `HttpResponse` out. Status codes are returned as data, never as errors,
//! so `ContentfulClient` alone decides what a non-200 means. Only failures
//! that prevent a response altogether become `ApiError::Transport`.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent pools connections and is cheap to clone, so one instance can
/// serve any number of clients and threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// No deadline. Use `from_config` to honor `ClientConfig::timeout`.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Every request fails with `ApiError::Transport` once `timeout`
    /// elapses.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    /// Applies the config's deadline, if any.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::build(config.timeout)
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
