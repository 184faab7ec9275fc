//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{manifest_warnings, ManifestLoader};
use dispatcher::FilenamePattern;
use serde::Serialize;
use tracing::info;

use super::load_config;
use crate::cli::ValidateArgs;
use crate::error::require_file;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    sensorlist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ValidationSummary>,
}

#[derive(Serialize)]
struct ValidationSummary {
    sensor_count: usize,
    sensors: Vec<String>,
    logfile_pattern: String,
    influx_enabled: bool,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(sensorlist = %args.sensorlist.display(), "Validating inputs");

    let result = validate_inputs(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Validation failed")
    }
}

fn validate_inputs(args: &ValidateArgs) -> ValidationResult {
    let mut result = ValidationResult {
        valid: false,
        sensorlist: args.sensorlist.display().to_string(),
        config_path: args.config.as_ref().map(|p| p.display().to_string()),
        error: None,
        warnings: Vec::new(),
        summary: None,
    };

    match check(args) {
        Ok((warnings, summary)) => {
            result.valid = true;
            result.warnings = warnings;
            result.summary = Some(summary);
        }
        Err(e) => result.error = Some(format!("{e:#}")),
    }
    result
}

fn check(args: &ValidateArgs) -> Result<(Vec<String>, ValidationSummary)> {
    require_file("Sensor list", &args.sensorlist)?;
    let manifest = ManifestLoader::load_from_path(&args.sensorlist)?;
    let config = load_config(args.config.as_deref())?;
    FilenamePattern::from_user(&config.logfile.pattern).context("Invalid logfile pattern")?;

    let summary = ValidationSummary {
        sensor_count: manifest.len(),
        sensors: manifest.names().map(str::to_owned).collect(),
        logfile_pattern: config.logfile.pattern.clone(),
        influx_enabled: config.influxdb.enabled,
    };
    Ok((manifest_warnings(&manifest), summary))
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Sensor list is valid: {}", result.sensorlist);
        if let Some(ref config) = result.config_path {
            println!("✓ Configuration is valid: {}", config);
        }

        if let Some(ref summary) = result.summary {
            println!("\n  Sensors: {}", summary.sensor_count);
            for name in &summary.sensors {
                println!("    - {}", name);
            }
            println!("  Logfile pattern: {}", summary.logfile_pattern);
            println!("  InfluxDB forwarding: {}", summary.influx_enabled);
        }

        if !result.warnings.is_empty() {
            println!("\n⚠ Warnings:");
            for warning in &result.warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Validation failed: {}", result.sensorlist);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(sensorlist: PathBuf, config: Option<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            sensorlist,
            config,
            json: true,
        }
    }

    #[test]
    fn test_duplicates_are_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("sensors.txt");
        std::fs::write(&list, "28.AA room\n28.BB room\n").unwrap();

        let result = validate_inputs(&args(list, None));
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("room"));
        assert_eq!(result.summary.unwrap().sensor_count, 2);
    }

    #[test]
    fn test_malformed_line_reported() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("sensors.txt");
        std::fs::write(&list, "28.AA kitchen\n28.BB\n").unwrap();

        let result = validate_inputs(&args(list, None));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains(":2 Need 2 items per line."));
    }

    #[test]
    fn test_bad_pattern_in_config() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("sensors.txt");
        std::fs::write(&list, "28.AA kitchen\n").unwrap();
        let config = dir.path().join("owtemp.toml");
        std::fs::write(&config, "[logfile]\npattern = \"log_@Q.log\"\n").unwrap();

        let result = validate_inputs(&args(list, Some(config)));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("Invalid logfile pattern"));
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("sensors.txt");
        std::fs::write(&list, "28.AA kitchen\n").unwrap();

        let result = validate_inputs(&args(list, None));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], true);
        assert!(json.get("warnings").is_none());
        assert!(json.get("error").is_none());
    }
}
