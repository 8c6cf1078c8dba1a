// src/config.rs
use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set. Please check your environment variables.")]
    Missing(&'static str),
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Credentials for the completion provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let base_url = non_empty_var("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Ok(Self { api_key, base_url })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = non_empty_var("RELAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value, source })?;
        Ok(Self { bind_addr })
    }
}

/// Where the messenger reaches the relay.
#[derive(Clone)]
pub struct MessengerConfig {
    pub relay_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("relay_url", &self.relay_url)
            .finish_non_exhaustive()
    }
}

impl MessengerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let relay_url = non_empty_var("RELAY_URL").ok_or(ConfigError::Missing("RELAY_URL"))?;
        let api_key = non_empty_var("RELAY_API_KEY").ok_or(ConfigError::Missing("RELAY_API_KEY"))?;
        Ok(Self { relay_url, api_key })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
