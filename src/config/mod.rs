#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::RecordFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// Fully resolved settings the service runs with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub format: RecordFormat,
    pub header: bool,
    pub lock_timeout_ms: u64,
}

impl StoreConfig {
    pub const DEFAULT_PATH: &'static str = "data/participants.csv";
    pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_PATH),
            format: RecordFormat::Raw,
            header: false,
            lock_timeout_ms: Self::DEFAULT_LOCK_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl AppConfig {
    /// Layers a TOML file over the defaults.
    pub fn with_toml(mut self, toml: &TomlConfig) -> Self {
        if let Some(server) = &toml.server {
            if let Some(bind) = server.bind {
                self.server.bind = bind;
            }
        }
        if let Some(store) = &toml.store {
            if let Some(path) = &store.path {
                self.store.path = path.clone();
            }
            if let Some(format) = store.format {
                self.store.format = format;
            }
            if let Some(header) = store.header {
                self.store.header = header;
            }
            if let Some(timeout) = store.lock_timeout_ms {
                self.store.lock_timeout_ms = timeout;
            }
        }
        if let Some(logging) = &toml.logging {
            if let Some(verbose) = logging.verbose {
                self.logging.verbose = verbose;
            }
            if let Some(json) = logging.json {
                self.logging.json = json;
            }
        }
        self
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store.path", &self.store.path)?;
        validate_positive_number("store.lock_timeout_ms", self.store.lock_timeout_ms, 1)?;
        Ok(())
    }
}
