//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Point writer creation error
    #[error("failed to create writer '{name}': {message}")]
    WriterCreation { name: String, message: String },
}

impl DispatcherError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a writer creation error
    pub fn writer_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriterCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
