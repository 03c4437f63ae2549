use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::errors::ApiError;

/// Tunables for talking to an instance, loaded from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Page size requested for following/followers lists
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Pause after each page of following/followers
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Pause after each latest-status lookup
    #[serde(default = "default_status_delay_ms")]
    pub status_delay_ms: u64,

    /// Pause after each successful unfollow
    #[serde(default = "default_unfollow_delay_ms")]
    pub unfollow_delay_ms: u64,

    /// Inactivity threshold used when `--inactive-months` is not given
    #[serde(default = "default_inactive_months")]
    pub inactive_months: i64,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_page_limit() -> u32 {
    80
}
fn default_page_delay_ms() -> u64 {
    500
}
fn default_status_delay_ms() -> u64 {
    300
}
fn default_unfollow_delay_ms() -> u64 {
    500
}
fn default_inactive_months() -> i64 {
    36
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            page_limit: default_page_limit(),
            page_delay_ms: default_page_delay_ms(),
            status_delay_ms: default_status_delay_ms(),
            unfollow_delay_ms: default_unfollow_delay_ms(),
            inactive_months: default_inactive_months(),
        }
    }
}

impl Settings {
    /// Get the data directory (~/.mastodon-unfollow)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".mastodon-unfollow")
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load settings from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn rate_limits(&self) -> RateLimits {
        RateLimits {
            page_delay: Duration::from_millis(self.page_delay_ms),
            status_delay: Duration::from_millis(self.status_delay_ms),
            unfollow_delay: Duration::from_millis(self.unfollow_delay_ms),
        }
    }
}

/// Fixed sleeps inserted between requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    pub page_delay: Duration,
    pub status_delay: Duration,
    pub unfollow_delay: Duration,
}

impl RateLimits {
    /// No sleeping at all; used by tests and fakes
    pub fn none() -> Self {
        Self {
            page_delay: Duration::ZERO,
            status_delay: Duration::ZERO,
            unfollow_delay: Duration::ZERO,
        }
    }
}

/// Who we are talking to and as whom
#[derive(Debug, Clone)]
pub struct Session {
    /// Bare host name, e.g. `mastodon.social`
    pub instance: String,
    pub token: String,
}

impl Session {
    /// Normalise the instance name: scheme prefixes and trailing slashes are dropped
    pub fn new(instance: &str, token: &str) -> Result<Self, ApiError> {
        let host = instance
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(ApiError::InvalidInstance {
                instance: instance.to_string(),
                message: "expected a host name like 'mastodon.social'".to_string(),
            });
        }

        Ok(Self {
            instance: host.to_string(),
            token: token.trim().to_string(),
        })
    }

    /// `https://{instance}/api/v1/`
    pub fn api_base(&self) -> Result<url::Url, ApiError> {
        url::Url::parse(&format!("https://{}/api/v1/", self.instance)).map_err(|e| {
            ApiError::InvalidInstance {
                instance: self.instance.clone(),
                message: e.to_string(),
            }
        })
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
