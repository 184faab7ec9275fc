//! FixedSink - one destination for the whole run (stdout or a single file)

use std::io::{Stdout, Write};

use chrono::{DateTime, Utc};
use contracts::{ContractError, LogSink};
use tracing::debug;

/// Sink that never switches destination
///
/// Fresh until the first write, never again afterwards.
pub struct FixedSink<W: Write> {
    name: String,
    destination: String,
    writer: W,
    fresh: bool,
    last_update: Option<DateTime<Utc>>,
}

impl FixedSink<Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new("stdout", "<stdout>", std::io::stdout())
    }
}

impl<W: Write> FixedSink<W> {
    /// Create a new FixedSink around any writer
    pub fn new(name: impl Into<String>, destination: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            writer,
            fresh: true,
            last_update: None,
        }
    }

    /// Timestamp passed to the latest `update`
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for FixedSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, now: DateTime<Utc>) -> Result<(), ContractError> {
        self.last_update = Some(now);
        Ok(())
    }

    fn is_fresh(&self) -> bool {
        self.fresh
    }

    fn destination(&self) -> Option<&str> {
        Some(&self.destination)
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ContractError> {
        self.writer.write_all(buf)?;
        self.fresh = false;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ContractError> {
        self.writer.flush()?;
        debug!(sink = %self.name, destination = %self.destination, "FixedSink closed");
        Ok(())
    }
}
