//! Command implementations.

mod run;
mod validate;

pub use run::run_poller;
pub use validate::run_validate;

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, DaemonConfig};
use std::path::Path;
use tracing::info;

use crate::error::require_file;

/// Load the config file if one was given, defaults otherwise
fn load_config(path: Option<&Path>) -> Result<DaemonConfig> {
    let Some(path) = path else {
        return Ok(DaemonConfig::default());
    };

    require_file("Configuration file", path)?;
    let config = ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    info!(config = %path.display(), "Configuration loaded");
    Ok(config)
}
