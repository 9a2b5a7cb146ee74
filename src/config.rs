//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_IMAGE_CONTAINER, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_MANAGEMENT_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SIZE_LIMIT_BYTE,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub azure: AzureConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Emit JSON log lines instead of the human readable format
    pub json_logs: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Blob storage configuration for image uploads
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub account_name: Option<String>,
    pub account_key: Option<String>,
    pub image_container: String,
    /// Upload limit per file, in bytes
    pub size_limit_byte: u64,
    /// Overrides `https://<account>.blob.core.windows.net`
    pub blob_endpoint: Option<String>,
}

/// Cloud service management configuration
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub subscription_id: Option<String>,
    /// PEM file holding the management certificate and its private key
    pub cert_path: Option<PathBuf>,
    pub management_endpoint: String,
    pub poll_timeout: Duration,
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            azure: AzureConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            account_name: optional_var("STORAGE_ACCOUNT_NAME"),
            account_key: optional_var("STORAGE_ACCOUNT_KEY"),
            image_container: env::var("STORAGE_IMAGE_CONTAINER")
                .unwrap_or_else(|_| DEFAULT_IMAGE_CONTAINER.to_string()),
            size_limit_byte: parse_var("STORAGE_SIZE_LIMIT_BYTE", DEFAULT_SIZE_LIMIT_BYTE)?,
            blob_endpoint: optional_var("STORAGE_BLOB_ENDPOINT"),
        })
    }

    /// Whether both account name and key are present
    pub fn is_account_configured(&self) -> bool {
        self.account_name.is_some() && self.account_key.is_some()
    }
}

impl AzureConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            subscription_id: optional_var("AZURE_SUBSCRIPTION_ID"),
            cert_path: optional_var("AZURE_CERT_PATH").map(PathBuf::from),
            management_endpoint: env::var("AZURE_MANAGEMENT_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_MANAGEMENT_ENDPOINT.to_string()),
            poll_timeout: Duration::from_secs(parse_var(
                "AZURE_POLL_TIMEOUT_SECS",
                DEFAULT_POLL_TIMEOUT_SECS,
            )?),
            poll_interval: Duration::from_secs(parse_var(
                "AZURE_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
        })
    }
}

/// Read an environment variable, treating empty values as unset
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: u16 = parse_var("HACKATHON_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_storage_account_configured() {
        let mut storage = StorageConfig {
            account_name: Some("acct".to_string()),
            account_key: None,
            image_container: DEFAULT_IMAGE_CONTAINER.to_string(),
            size_limit_byte: DEFAULT_SIZE_LIMIT_BYTE,
            blob_endpoint: None,
        };
        assert!(!storage.is_account_configured());

        storage.account_key = Some("a2V5".to_string());
        assert!(storage.is_account_configured());
    }
}
