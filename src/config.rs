//! Runtime configuration
//!
//! Both the client side (search widget, market data client) and the
//! company search server read their settings from the environment, with
//! defaults that match the hosted backend.

use crate::error::{AppError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Hosted backend used when `MARKET_INFO_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://market-info-m22z.onrender.com";

/// Client-side settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (no trailing slash)
    pub base_url: String,
    /// Quiet period after a keystroke before a search is issued
    pub debounce: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(250),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Build from `MARKET_INFO_API_URL`, `MARKET_INFO_DEBOUNCE_MS` and
    /// `MARKET_INFO_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MARKET_INFO_API_URL") {
            config.base_url = url;
        }
        if let Ok(ms) = std::env::var("MARKET_INFO_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(parse_number("MARKET_INFO_DEBOUNCE_MS", &ms)?);
        }
        if let Ok(secs) = std::env::var("MARKET_INFO_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("MARKET_INFO_TIMEOUT_SECS", &secs)?);
        }

        config.validate()
    }

    /// Check the base URL and normalise away a trailing slash
    pub fn validate(mut self) -> Result<Self> {
        let parsed = Url::parse(&self.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported scheme in API URL: {}",
                parsed.scheme()
            )));
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

/// Company search server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding the company directory
    pub companies_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            companies_path: PathBuf::from("companies.json"),
        }
    }
}

impl ServerConfig {
    /// Build from `HOST`, `PORT` and `COMPANIES_PATH`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Ok(path) = std::env::var("COMPANIES_PATH") {
            config.companies_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", name, value)))
}
