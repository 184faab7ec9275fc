//! Error types for CLI operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file missing
    #[error("{kind} not found: {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    /// Configuration rejected after CLI overrides
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    /// Poll loop ended with an error
    #[error("Poll loop failed: {message}")]
    PollLoop { message: String },
}

impl CliError {
    pub fn not_found(kind: &'static str, path: &Path) -> Self {
        Self::NotFound {
            kind,
            path: path.to_path_buf(),
        }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    pub fn poll_loop(message: impl Into<String>) -> Self {
        Self::PollLoop {
            message: message.into(),
        }
    }
}

/// Fail with `NotFound` unless `path` exists
pub fn require_file(kind: &'static str, path: &Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::not_found(kind, path))
    }
}
