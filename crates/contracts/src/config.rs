//! DaemonConfig - Config Loader output
//!
//! Describes the collaborators of the poll loop: sensor server, time-series
//! database, logfile and poll timing. Every field has a default, so an empty
//! file (or no file at all) reproduces the stock setup.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ContractError;

/// Default logfile pattern (`@` stands for `%`)
pub const DEFAULT_LOGFILE_PATTERN: &str = "temp_@Y-@m-@d.log";

/// Default poll interval in seconds
pub const DEFAULT_INTERVAL_SECS: f64 = 15.0;

/// Complete daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DaemonConfig {
    /// owserver connection
    #[validate(nested)]
    pub owserver: OwServerConfig,

    /// InfluxDB connection
    #[validate(nested)]
    pub influxdb: InfluxConfig,

    /// Text logfile output
    #[validate(nested)]
    pub logfile: LogfileConfig,

    /// Poll timing
    #[validate(nested)]
    pub poll: PollConfig,
}

/// owserver (one-wire network server) settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OwServerConfig {
    #[validate(length(min = 1))]
    pub host: String,

    pub port: u16,

    /// Property read below every sensor address
    #[validate(length(min = 1))]
    pub property: String,

    /// Bound for connect + request of one read
    #[validate(range(exclusive_min = 0.0))]
    pub timeout_secs: f64,
}

impl Default for OwServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4304,
            property: "temperature".to_string(),
            timeout_secs: 5.0,
        }
    }
}

impl OwServerConfig {
    /// `timeout_secs` as a Duration
    pub fn timeout(&self) -> Result<Duration, ContractError> {
        seconds("owserver.timeout_secs", self.timeout_secs)
    }
}

/// InfluxDB 1.x HTTP API settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InfluxConfig {
    /// Forward readings at all
    pub enabled: bool,

    /// Base URL (e.g., "http://localhost:8086")
    #[validate(length(min = 1))]
    pub url: String,

    #[validate(length(min = 1))]
    pub database: String,

    #[validate(length(min = 1))]
    pub measurement: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[validate(range(exclusive_min = 0.0))]
    pub timeout_secs: f64,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8086".to_string(),
            database: "heating".to_string(),
            measurement: "heating".to_string(),
            username: None,
            password: None,
            timeout_secs: 10.0,
        }
    }
}

impl InfluxConfig {
    /// `timeout_secs` as a Duration
    pub fn timeout(&self) -> Result<Duration, ContractError> {
        seconds("influxdb.timeout_secs", self.timeout_secs)
    }
}

/// Text logfile settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogfileConfig {
    /// strftime-like file name pattern with `@` instead of `%`
    #[validate(length(min = 1))]
    pub pattern: String,

    /// Write rows to stdout instead of rotating files
    pub stdout: bool,
}

impl Default for LogfileConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_LOGFILE_PATTERN.to_string(),
            stdout: false,
        }
    }
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PollConfig {
    /// Sleep between cycles
    #[validate(range(exclusive_min = 0.0))]
    pub interval_secs: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl PollConfig {
    /// `interval_secs` as a Duration
    pub fn interval(&self) -> Result<Duration, ContractError> {
        seconds("poll.interval_secs", self.interval_secs)
    }
}

/// Positive, finite seconds that fit a Duration
fn seconds(field: &str, secs: f64) -> Result<Duration, ContractError> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(ContractError::config_validation(
            field,
            format!("must be greater than 0, got {secs}"),
        ));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ContractError::config_validation(field, format!("{secs}: {e}")))
}
