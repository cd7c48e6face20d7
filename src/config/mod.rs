//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    load_config, ClientSection, Config, ConfigError, CredentialsSection, GatewaySection,
    LoggingSection, ResearchSection, ScanSection, GATEWAY_URL_ENV, JWT_ENV, UPSTREAM_URL_ENV,
};
