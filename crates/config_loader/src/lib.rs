//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Read the sensor manifest (two-column text file)
//! - Parse TOML/JSON daemon configuration files
//! - Validate configuration legality
//!
//! # Example
//!
//! ```no_run
//! use config_loader::{ConfigLoader, ManifestLoader};
//! use std::path::Path;
//!
//! let manifest = ManifestLoader::load_from_path(Path::new("sensors.txt")).unwrap();
//! let config = ConfigLoader::load_from_path(Path::new("owtemp.toml")).unwrap();
//! println!("{} sensors, owserver at {}", manifest.len(), config.owserver.host);
//! ```

mod manifest;
mod parser;
mod validator;

pub use contracts::{DaemonConfig, SensorManifest};
pub use manifest::{parse_tuples, read_tuples, MANIFEST_COLUMNS};
pub use parser::ConfigFormat;
pub use validator::manifest_warnings;

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Sensor manifest loader
pub struct ManifestLoader;

impl ManifestLoader {
    /// Load the sensor manifest from a file
    ///
    /// # Errors
    /// - File read failure
    /// - Line with a column count other than 2
    pub fn load_from_path(path: &Path) -> Result<SensorManifest, ContractError> {
        let tuples = read_tuples(path, MANIFEST_COLUMNS)?;
        let manifest = manifest::into_manifest(tuples);
        debug!(path = %path.display(), sensors = manifest.len(), "Manifest loaded");
        Ok(manifest)
    }

    /// Load the sensor manifest from a string
    pub fn load_from_str(content: &str, origin: &Path) -> Result<SensorManifest, ContractError> {
        let tuples = parse_tuples(content, origin, MANIFEST_COLUMNS)?;
        Ok(manifest::into_manifest(tuples))
    }
}

/// Daemon configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<DaemonConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<DaemonConfig, ContractError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Validate a configuration assembled elsewhere (e.g., after CLI overrides)
    pub fn validate(config: &DaemonConfig) -> Result<(), ContractError> {
        validator::validate(config)
    }

    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }
}
