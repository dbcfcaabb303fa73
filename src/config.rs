use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Environment-driven configuration. Only the gateway host/port and the
/// login poll cadence are configurable; everything else is fixed contract.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub poll_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("FRICTION_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("FRICTION_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid FRICTION_PORT: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let poll_interval_ms = match env::var("FRICTION_POLL_INTERVAL_MS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid FRICTION_POLL_INTERVAL_MS: {}", raw))?,
            Err(_) => DEFAULT_POLL_INTERVAL_MS,
        };

        Ok(Self {
            host,
            port,
            poll_interval_ms,
        })
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&format!("http://{}:{}", self.host, self.port))
            .with_context(|| format!("invalid gateway address {}:{}", self.host, self.port))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
