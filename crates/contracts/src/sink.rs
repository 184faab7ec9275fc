//! Sink traits - poll loop output interfaces
//!
//! `LogSink` receives formatted text rows, `PointWriter` receives
//! time-series records.

use chrono::{DateTime, Utc};

use crate::{ContractError, TimeSeriesPoint};

/// Text log destination
///
/// Implementations decide which destination is active for a timestamp.
/// Freshness is true exactly when the active destination has received no
/// write since it was selected; callers use it to emit a header once per
/// destination.
pub trait LogSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Select the destination for `now`, switching if needed
    fn update(&mut self, now: DateTime<Utc>) -> Result<(), ContractError>;

    /// Whether the active destination has received no write yet
    fn is_fresh(&self) -> bool;

    /// Identity of the active destination, if any
    fn destination(&self) -> Option<&str>;

    /// Append bytes to the active destination
    fn write(&mut self, buf: &[u8]) -> Result<(), ContractError>;

    /// Flush buffered data of the active destination
    fn flush(&mut self) -> Result<(), ContractError>;

    /// Flush and release the active destination
    fn close(&mut self) -> Result<(), ContractError>;
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn update(&mut self, now: DateTime<Utc>) -> Result<(), ContractError> {
        (**self).update(now)
    }

    fn is_fresh(&self) -> bool {
        (**self).is_fresh()
    }

    fn destination(&self) -> Option<&str> {
        (**self).destination()
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ContractError> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), ContractError> {
        (**self).close()
    }
}

/// Time-series forward capability
#[trait_variant::make(PointWriter: Send)]
pub trait LocalPointWriter {
    /// Writer name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write a batch of points
    ///
    /// # Errors
    /// Returns `Forward` error (should include context)
    async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<(), ContractError>;
}
