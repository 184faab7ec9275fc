//! Poller error types

use thiserror::Error;

/// Errors that end the poll loop
#[derive(Debug, Error)]
pub enum PollerError {
    /// Logfile could not be opened, written or flushed
    #[error("logfile '{sink}' failed: {source}")]
    Sink {
        sink: String,
        #[source]
        source: contracts::ContractError,
    },
}

impl PollerError {
    pub fn sink(sink: impl Into<String>, source: contracts::ContractError) -> Self {
        Self::Sink {
            sink: sink.into(),
            source,
        }
    }
}
