use crate::config::{AppConfig, TomlConfig};
use crate::domain::model::RecordFormat;
use crate::utils::error::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "participant-form")]
#[command(about = "Web form that appends department/name pairs to a CSV file")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on (default 127.0.0.1:8080)")]
    pub bind: Option<SocketAddr>,

    #[arg(long, help = "Store file (default data/participants.csv)")]
    pub store_path: Option<PathBuf>,

    #[arg(long, value_enum, help = "Line layout: raw (verbatim) or csv (quoted)")]
    pub record_format: Option<RecordFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file if one was given, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            let toml = TomlConfig::from_file(path)?;
            config = config.with_toml(&toml);
        }

        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(path) = &self.store_path {
            config.store.path = path.clone();
        }
        if let Some(format) = self.record_format {
            config.store.format = format;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if self.json_logs {
            config.logging.json = true;
        }

        Ok(config)
    }
}
