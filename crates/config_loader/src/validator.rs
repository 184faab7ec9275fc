//! Config validation
//!
//! Rules:
//! - derive rules on `DaemonConfig` (non-empty names, positive durations)
//! - durations are finite and fit a `Duration`
//! - influxdb.url uses http or https
//! - logfile pattern is not blank
//!
//! Manifest checks never fail; they only produce warnings.

use contracts::{ContractError, DaemonConfig, SensorManifest};
use validator::Validate;

/// Validate DaemonConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &DaemonConfig) -> Result<(), ContractError> {
    config
        .validate()
        .map_err(|e| ContractError::config_validation("config", e.to_string()))?;
    validate_durations(config)?;
    validate_influx_url(config)?;
    validate_logfile_pattern(config)?;
    Ok(())
}

fn validate_durations(config: &DaemonConfig) -> Result<(), ContractError> {
    config.owserver.timeout()?;
    config.influxdb.timeout()?;
    config.poll.interval()?;
    Ok(())
}

fn validate_influx_url(config: &DaemonConfig) -> Result<(), ContractError> {
    let url = &config.influxdb.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ContractError::config_validation(
            "influxdb.url",
            format!("url must start with http:// or https://, got '{url}'"),
        ));
    }
    Ok(())
}

fn validate_logfile_pattern(config: &DaemonConfig) -> Result<(), ContractError> {
    if config.logfile.pattern.trim().is_empty() {
        return Err(ContractError::config_validation(
            "logfile.pattern",
            "pattern cannot be blank",
        ));
    }
    Ok(())
}

/// Collect manifest warnings (non-fatal issues)
///
/// Duplicate names are kept as loaded: the later reading overwrites the
/// earlier one in every cycle.
pub fn manifest_warnings(manifest: &SensorManifest) -> Vec<String> {
    let mut warnings = Vec::new();

    if manifest.is_empty() {
        warnings.push("Manifest lists no sensors - rows will be empty".to_string());
    }

    for name in manifest.duplicate_names() {
        warnings.push(format!(
            "Sensor name '{name}' appears more than once - the last reading wins"
        ));
    }

    warnings
}
