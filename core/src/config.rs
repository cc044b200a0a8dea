//! Client configuration.
//!
//! `ClientConfig` carries the credentials for one space plus the knobs the
//! transport honors. It is plain data: building one never touches the
//! network.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";

const ENV_ACCESS_TOKEN: &str = "CONTENTFUL_ACCESS_TOKEN";
const ENV_SPACE_ID: &str = "CONTENTFUL_SPACE_ID";
const ENV_BASE_URL: &str = "CONTENTFUL_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "CONTENTFUL_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub access_token: String,
    pub space_id: String,
    pub base_url: String,
    /// Deadline for a whole request, connect through body read. `None`
    /// leaves the transport's own default in place. Only honored by a
    /// transport built with `UreqTransport::from_config`.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            space_id: space_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }

    /// Point the client at another host, e.g. the preview API or a mock.
    /// A trailing slash is dropped.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load from `CONTENTFUL_ACCESS_TOKEN`, `CONTENTFUL_SPACE_ID` and the
    /// optional `CONTENTFUL_BASE_URL` / `CONTENTFUL_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let access_token = lookup(ENV_ACCESS_TOKEN)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENV_ACCESS_TOKEN))?;
        let space_id = lookup(ENV_SPACE_ID)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENV_SPACE_ID))?;

        let mut config = Self::new(access_token, space_id);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config = config.base_url(&base_url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn default_user_agent() -> String {
    format!("contentful-core/{}", env!("CARGO_PKG_VERSION"))
}

// The token stays out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("space_id", &self.space_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
