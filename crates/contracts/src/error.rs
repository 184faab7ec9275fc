//! Layered error definitions
//!
//! Categorized by source: manifest / config / sensor / sink / forward

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Manifest Errors =====
    /// Manifest line has the wrong number of columns
    #[error("{}:{line} Need {expected} items per line.", path.display())]
    ManifestFormat {
        path: PathBuf,
        line: usize,
        expected: usize,
    },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// Logfile name pattern cannot be used
    #[error("invalid logfile pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // ===== Sensor Errors =====
    /// Sensor could not be read or its value could not be parsed
    #[error("sensor '{address}' read error: {message}")]
    SensorRead { address: String, message: String },

    /// Wire protocol violation from the sensor server
    #[error("protocol error: {message}")]
    Protocol { message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Time-series database write error
    #[error("forward error: {message}")]
    Forward { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create manifest format error
    pub fn manifest_format(path: impl Into<PathBuf>, line: usize, expected: usize) -> Self {
        Self::ManifestFormat {
            path: path.into(),
            line,
            expected,
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create sensor read error
    pub fn sensor_read(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SensorRead {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Create protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create forward error
    pub fn forward(message: impl Into<String>) -> Self {
        Self::Forward {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_format_message() {
        let err = ContractError::manifest_format("sensors.txt", 4, 2);
        assert_eq!(err.to_string(), "sensors.txt:4 Need 2 items per line.");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ContractError = io.into();
        assert!(matches!(err, ContractError::Io(_)));
    }
}
