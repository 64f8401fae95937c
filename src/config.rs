use std::{env, net::SocketAddr, num::NonZeroUsize, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub message_capacity: Option<NonZeroUsize>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid u16")]
    InvalidPort,
    #[error("MESSAGE_CAPACITY must be a positive integer")]
    InvalidCapacity,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let static_dir = match lookup("STATIC_DIR") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(PathBuf::from(value.trim())),
            None => Some(PathBuf::from(DEFAULT_STATIC_DIR)),
        };
        let message_capacity = var("MESSAGE_CAPACITY")
            .map(|value| {
                value
                    .parse::<NonZeroUsize>()
                    .map_err(|_| ConfigError::InvalidCapacity)
            })
            .transpose()?;

        let config = Self {
            bind_addr,
            port,
            static_dir,
            message_capacity,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}
