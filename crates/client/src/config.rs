//! Client configuration loaded from environment variables.

use std::time::Duration;

use crate::error::ConfigError;

/// Connection settings for the CRM API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the CRM server, without a trailing slash.
    pub api_url: String,
    /// Bearer token sent as `Authorization`, if any.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `CRM_API_URL`          | `http://localhost:8080` |
    /// | `CRM_API_TOKEN`        | unset                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("CRM_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "http://localhost:8080".into());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "CRM_API_URL",
                value: api_url,
                reason: "must start with http:// or https://".into(),
            });
        }

        let token = lookup("CRM_API_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let raw_timeout = lookup("REQUEST_TIMEOUT_SECS").unwrap_or_else(|| "30".into());
        let request_timeout_secs: u64 =
            raw_timeout
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    var: "REQUEST_TIMEOUT_SECS",
                    value: raw_timeout.clone(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
