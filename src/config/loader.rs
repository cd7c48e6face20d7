//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.
//! Every section has defaults, so a missing section (or no file at all) is valid.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::gateway::{UpstreamConfig, TOKEN_API_BASE_URL};
use crate::adapters::token_api::requests::{
    DEFAULT_HOLDERS_LIMIT, DEFAULT_POOLS_LIMIT, DEFAULT_SWAPS_LIMIT, DEFAULT_TOKEN_LIMIT,
};
use crate::adapters::token_api::HttpGatewayConfig;
use crate::application::token_research::DEFAULT_OHLC_DAYS;
use crate::application::{ResearchOptions, ScanOptions};
use crate::domain::is_supported;

/// Env var overriding `gateway.upstream_url`
pub const UPSTREAM_URL_ENV: &str = "TOKEN_API_URL";
/// Env var overriding `client.gateway_url`
pub const GATEWAY_URL_ENV: &str = "CHAINSCOPE_GATEWAY_URL";
/// Env var overriding `credentials.jwt`
pub const JWT_ENV: &str = "TOKEN_API_JWT";

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewaySection,
    pub client: ClientSection,
    pub scan: ScanSection,
    pub research: ResearchSection,
    pub logging: LoggingSection,
    pub credentials: CredentialsSection,
}

/// Gateway server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    /// Address the gateway binds to
    pub listen_addr: String,
    /// Token API base URL
    pub upstream_url: String,
    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
            upstream_url: TOKEN_API_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl GatewaySection {
    /// Get upstream URL with environment variable override
    /// Checks TOKEN_API_URL env var first, falls back to config value
    pub fn get_upstream_url(&self) -> String {
        std::env::var(UPSTREAM_URL_ENV).unwrap_or_else(|_| self.upstream_url.clone())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "listen_addr must be host:port, got {:?}",
                self.listen_addr
            ))
        })
    }
}

/// Client configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    /// Remote gateway base URL; empty means the in-process relay
    pub gateway_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            gateway_url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl ClientSection {
    /// Remote gateway URL, if one is configured.
    /// Checks CHAINSCOPE_GATEWAY_URL env var first, falls back to config value
    pub fn get_gateway_url(&self) -> Option<String> {
        non_blank(std::env::var(GATEWAY_URL_ENV).ok())
            .or_else(|| non_blank(Some(self.gateway_url.clone())))
    }
}

/// Wallet scan configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    /// Chain used for ERC-20 holdings when none is given
    pub default_chain: String,
    /// Maximum ERC-20 holdings fetched
    pub token_limit: u32,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            default_chain: "mainnet".to_string(),
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }
}

/// Token research configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResearchSection {
    pub holders_limit: u32,
    pub pools_limit: u32,
    pub swaps_limit: u32,
    /// Days of daily candles requested for the primary pool
    pub ohlc_days: u32,
}

impl Default for ResearchSection {
    fn default() -> Self {
        Self {
            holders_limit: DEFAULT_HOLDERS_LIMIT,
            pools_limit: DEFAULT_POOLS_LIMIT,
            swaps_limit: DEFAULT_SWAPS_LIMIT,
            ohlc_days: DEFAULT_OHLC_DAYS,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Credentials configuration section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsSection {
    /// Token API JWT (prefer the TOKEN_API_JWT env var)
    pub jwt: String,
}

impl CredentialsSection {
    /// Get JWT with environment variable override
    /// Checks TOKEN_API_JWT env var first, falls back to config value
    pub fn get_jwt(&self) -> Option<String> {
        non_blank(std::env::var(JWT_ENV).ok()).or_else(|| non_blank(Some(self.jwt.clone())))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate gateway section
        self.gateway.socket_addr()?;

        if self.gateway.upstream_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "upstream_url cannot be empty".to_string(),
            ));
        }

        if self.gateway.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.timeout_secs must be > 0".to_string(),
            ));
        }

        // Validate client section
        if self.client.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "client.timeout_secs must be > 0".to_string(),
            ));
        }

        // Validate scan section
        if !is_supported(&self.scan.default_chain) {
            return Err(ConfigError::ValidationError(format!(
                "default_chain must be a registered chain, got {:?}",
                self.scan.default_chain
            )));
        }

        if self.scan.token_limit == 0 {
            return Err(ConfigError::ValidationError(
                "token_limit must be > 0".to_string(),
            ));
        }

        // Validate research section
        for (name, value) in [
            ("holders_limit", self.research.holders_limit),
            ("pools_limit", self.research.pools_limit),
            ("swaps_limit", self.research.swaps_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!("{} must be > 0", name)));
            }
        }

        if !(1..=365).contains(&self.research.ohlc_days) {
            return Err(ConfigError::ValidationError(format!(
                "ohlc_days must be 1-365, got {}",
                self.research.ohlc_days
            )));
        }

        // Validate logging
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got {:?}",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}

impl From<&Config> for UpstreamConfig {
    fn from(config: &Config) -> Self {
        UpstreamConfig {
            base_url: config.gateway.get_upstream_url(),
            timeout: Duration::from_secs(config.gateway.timeout_secs),
        }
    }
}

impl From<&Config> for HttpGatewayConfig {
    fn from(config: &Config) -> Self {
        HttpGatewayConfig {
            base_url: config
                .client
                .get_gateway_url()
                .unwrap_or_else(|| HttpGatewayConfig::default().base_url),
            timeout: Duration::from_secs(config.client.timeout_secs),
        }
    }
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        ScanOptions {
            token_limit: config.scan.token_limit,
        }
    }
}

impl From<&Config> for ResearchOptions {
    fn from(config: &Config) -> Self {
        ResearchOptions {
            holders_limit: config.research.holders_limit,
            pools_limit: config.research.pools_limit,
            swaps_limit: config.research.swaps_limit,
            ohlc_days: config.research.ohlc_days,
        }
    }
}
