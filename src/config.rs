use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::converter::DEFAULT_CONVERTER;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number, got '{0}'")]
    InvalidPort(String),
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root holding `templates/`, `documents/` and `pdfs/`.
    pub storage_dir: PathBuf,
    /// Program invoked for PDF conversion.
    pub converter_bin: String,
    /// Prefix for download links; empty gives relative links.
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            storage_dir: PathBuf::from("download"),
            converter_bin: DEFAULT_CONVERTER.to_string(),
            public_base_url: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("APP_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("APP_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(dir) = lookup("STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(bin) = lookup("CONVERTER_BIN") {
            config.converter_bin = bin;
        }
        if let Some(url) = lookup("PUBLIC_BASE_URL") {
            config.public_base_url = url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
