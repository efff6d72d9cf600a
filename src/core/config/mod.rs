use std::net::SocketAddr;
use std::time::Duration;

use crate::core::feed::fetcher::{BROWSER_USER_AGENT, FEED_URL};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

const ADDR_VAR: &str = "RSS_PROXY_ADDR";
const TIMEOUT_VAR: &str = "RSS_PROXY_UPSTREAM_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RSS_PROXY_ADDR is not a socket address: {0}")]
    InvalidAddr(#[from] std::net::AddrParseError),
    #[error("RSS_PROXY_UPSTREAM_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub feed_url: String,
    pub user_agent: String,
    /// Total time allowed for one upstream fetch. `None` waits indefinitely.
    pub upstream_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            feed_url: FEED_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            upstream_timeout: None,
        }
    }
}

impl Config {
    /// Loads `.env.local` and `.env` when present, then reads the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr: SocketAddr = lookup(ADDR_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .trim()
            .parse()?;
        let upstream_timeout = match lookup(TIMEOUT_VAR).filter(|value| !value.trim().is_empty()) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            addr,
            upstream_timeout,
            ..Self::default()
        })
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
