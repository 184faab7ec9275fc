//! Sink implementations
//!
//! Contains RotatingSink and FixedSink, plus the factory choosing between
//! them from configuration.

mod fixed;
mod rotating;

pub use self::fixed::FixedSink;
pub use self::rotating::RotatingSink;

use contracts::{LogSink, LogfileConfig};
use tracing::info;

use crate::error::DispatcherError;
use crate::pattern::FilenamePattern;

/// Boxed sink as held by the poll loop
pub type BoxedLogSink = Box<dyn LogSink + Send>;

/// Create the configured sink
///
/// `stdout = true` selects a FixedSink on standard output, otherwise a
/// RotatingSink over the logfile pattern.
pub fn create_sink(config: &LogfileConfig) -> Result<BoxedLogSink, DispatcherError> {
    if config.stdout {
        info!("Logging rows to stdout");
        return Ok(Box::new(FixedSink::stdout()));
    }

    let pattern = FilenamePattern::from_user(&config.pattern)
        .map_err(|e| DispatcherError::sink_creation("logfile", e.to_string()))?;
    info!(pattern = %pattern.source(), strftime = %pattern.as_strftime(), "Logging rows to rotating logfile");
    Ok(Box::new(RotatingSink::new("logfile", pattern)))
}
