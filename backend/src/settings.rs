//! Service configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `BIRDS_*` environment variables and
//! an optional configuration file, in increasing order of precedence as
//! resolved by `ortho_config`.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{ParseUpdateModeError, UpdateMode};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4040;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_ID_SEED: u64 = 1;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid host '{host}': {message}")]
    InvalidHost { host: String, message: String },
    #[error(transparent)]
    UpdateMode(#[from] ParseUpdateModeError),
    #[error("database_url must not be empty when set")]
    EmptyDatabaseUrl,
}

/// Runtime settings for the birds service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BIRDS")]
pub struct BirdsSettings {
    /// Interface address to bind.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string; selects the durable store when set.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Update contract: `merge` or `replace`.
    pub update_mode: Option<String>,
    /// Load the example birds into a fresh in-memory store.
    #[ortho_config(default = false)]
    pub seed_examples: bool,
    /// First identifier issued by the in-memory store.
    pub id_seed: Option<u64>,
    /// Public base URL advertised in the OpenAPI document.
    pub server_url: Option<String>,
}

impl BirdsSettings {
    /// Socket address combining `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Database URL, if the durable store is configured.
    pub fn database_url(&self) -> Result<Option<&str>, SettingsError> {
        match self.database_url.as_deref() {
            Some(url) if url.trim().is_empty() => Err(SettingsError::EmptyDatabaseUrl),
            other => Ok(other),
        }
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Configured update contract, defaulting to merge.
    pub fn update_mode(&self) -> Result<UpdateMode, SettingsError> {
        match self.update_mode.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(UpdateMode::default()),
        }
    }

    pub fn id_seed(&self) -> u64 {
        self.id_seed.unwrap_or(DEFAULT_ID_SEED)
    }

    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }
}
