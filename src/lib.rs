pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::FileStore;
pub use config::AppConfig;
pub use core::{form::FormHandler, service::FormService};
pub use utils::error::{FormError, Result};
