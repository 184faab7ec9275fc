//! RotatingSink - appends rows to a file named after the current time

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use contracts::{ContractError, LogSink};
use tracing::{debug, error, info, instrument};

use crate::pattern::FilenamePattern;

/// Destination currently open for appending
struct OpenFile {
    destination: String,
    writer: BufWriter<File>,
    fresh: bool,
}

/// Sink that selects its file by formatting the timestamp through a pattern
///
/// At most one file is open at a time. A new file is opened only after the
/// previous one has been flushed and closed.
pub struct RotatingSink {
    name: String,
    pattern: FilenamePattern,
    current: Option<OpenFile>,
}

impl RotatingSink {
    /// Create a new RotatingSink; no file is opened until the first update
    pub fn new(name: impl Into<String>, pattern: FilenamePattern) -> Self {
        Self {
            name: name.into(),
            pattern,
            current: None,
        }
    }

    /// Open `destination` for appending, creating missing parent directories
    fn open(&self, destination: String) -> Result<OpenFile, ContractError> {
        let opened = Path::new(&destination)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty() && !parent.exists())
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&destination)
            });

        match opened {
            Ok(file) => {
                info!(sink = %self.name, destination = %destination, "New logfile");
                Ok(OpenFile {
                    destination,
                    writer: BufWriter::new(file),
                    fresh: true,
                })
            }
            Err(e) => Err(self.io_error(&destination, "open", e)),
        }
    }

    fn close_current(&mut self) -> Result<(), ContractError> {
        if let Some(mut open) = self.current.take() {
            open.writer
                .flush()
                .map_err(|e| self.io_error(&open.destination, "flush", e))?;
            debug!(sink = %self.name, destination = %open.destination, "Logfile closed");
        }
        Ok(())
    }

    fn io_error(&self, destination: &str, op: &str, e: std::io::Error) -> ContractError {
        error!(sink = %self.name, destination, op, error = %e, "Logfile I/O failed");
        ContractError::Io(std::io::Error::new(
            e.kind(),
            format!("{op} {destination}: {e}"),
        ))
    }
}

impl LogSink for RotatingSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "rotating_sink_update", skip(self), fields(sink = %self.name))]
    fn update(&mut self, now: DateTime<Utc>) -> Result<(), ContractError> {
        let candidate = self.pattern.render(&now)?;
        if self
            .current
            .as_ref()
            .is_some_and(|open| open.destination == candidate)
        {
            return Ok(());
        }

        self.close_current()?;
        self.current = Some(self.open(candidate)?);
        Ok(())
    }

    fn is_fresh(&self) -> bool {
        self.current.as_ref().is_some_and(|open| open.fresh)
    }

    fn destination(&self) -> Option<&str> {
        self.current.as_ref().map(|open| open.destination.as_str())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), ContractError> {
        let open = match self.current.take() {
            Some(open) => open,
            None => self.open(self.pattern.render(&Utc::now())?)?,
        };
        let open = self.current.insert(open);

        match open.writer.write_all(buf) {
            Ok(()) => {
                open.fresh = false;
                Ok(())
            }
            Err(e) => {
                let destination = open.destination.clone();
                Err(self.io_error(&destination, "write", e))
            }
        }
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        let Some(open) = self.current.as_mut() else {
            return Ok(());
        };
        let result = open
            .writer
            .flush()
            .and_then(|_| open.writer.get_ref().sync_data());
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                let destination = open.destination.clone();
                Err(self.io_error(&destination, "flush", e))
            }
        }
    }

    #[instrument(name = "rotating_sink_close", skip(self), fields(sink = %self.name))]
    fn close(&mut self) -> Result<(), ContractError> {
        self.close_current()
    }
}

impl Drop for RotatingSink {
    fn drop(&mut self) {
        if let Some(open) = self.current.as_mut() {
            let _ = open.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn at(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, m, s).unwrap()
    }

    fn sink_in(dir: &Path) -> RotatingSink {
        let pattern = format!("{}/log_%Y-%m-%d", dir.display());
        RotatingSink::new("test_rotating", FilenamePattern::from_strftime(&pattern).unwrap())
    }

    #[test]
    fn test_starts_closed() {
        let dir = tempdir().unwrap();
        let sink = sink_in(dir.path());
        assert!(sink.destination().is_none());
        assert!(!sink.is_fresh());
    }

    #[test]
    fn test_update_opens_fresh_destination() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());
        sink.update(at(1, 10, 0, 0)).unwrap();

        assert!(sink.is_fresh());
        let expected = dir.path().join("log_2024-01-01");
        assert_eq!(sink.destination(), Some(expected.to_str().unwrap()));
        assert!(expected.exists());
    }

    #[test]
    fn test_write_clears_freshness() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());
        sink.update(at(1, 10, 0, 0)).unwrap();
        sink.write(b"# a b\n").unwrap();
        assert!(!sink.is_fresh());
    }

    #[test]
    fn test_same_window_update_keeps_state() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.update(at(1, 0, 0, 1)).unwrap();
        sink.update(at(1, 23, 59, 59)).unwrap();
        assert!(sink.is_fresh(), "no write yet, still fresh");

        sink.write(b"row\n").unwrap();
        sink.update(at(1, 23, 59, 59)).unwrap();
        assert!(!sink.is_fresh(), "same destination keeps freshness");
    }

    #[test]
    fn test_rotation_switches_file() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.update(at(1, 23, 59, 50)).unwrap();
        sink.write(b"first\n").unwrap();
        sink.update(at(2, 0, 0, 5)).unwrap();
        assert!(sink.is_fresh());
        sink.write(b"second\n").unwrap();
        assert!(!sink.is_fresh());
        sink.close().unwrap();

        let day1 = fs::read_to_string(dir.path().join("log_2024-01-01")).unwrap();
        let day2 = fs::read_to_string(dir.path().join("log_2024-01-02")).unwrap();
        assert_eq!(day1, "first\n");
        assert_eq!(day2, "second\n");
    }

    #[test]
    fn test_write_while_closed_opens_now() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());
        sink.write(b"late\n").unwrap();
        assert!(sink.destination().is_some());
        assert!(!sink.is_fresh());
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log_2024-01-01");
        fs::write(&path, "old\n").unwrap();

        let mut sink = sink_in(dir.path());
        sink.update(at(1, 8, 0, 0)).unwrap();
        assert!(sink.is_fresh(), "reopened file counts as fresh");
        sink.write(b"new\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/%Y/%m/temps.log", dir.path().display());
        let mut sink =
            RotatingSink::new("nested", FilenamePattern::from_strftime(&pattern).unwrap());
        sink.update(at(3, 0, 0, 0)).unwrap();
        assert!(dir.path().join("2024/01/temps.log").exists());
    }

    #[test]
    fn test_open_failure_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let pattern = format!("{}/log_%d", blocker.display());
        let mut sink = RotatingSink::new("bad", FilenamePattern::from_strftime(&pattern).unwrap());

        let err = sink.update(at(1, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, ContractError::Io(_)));
        assert!(sink.destination().is_none());
    }

    #[test]
    fn test_flush_when_closed_is_noop() {
        let dir = tempdir().unwrap();
        let mut sink = sink_in(dir.path());
        assert!(sink.flush().is_ok());
        assert!(sink.close().is_ok());
    }
}
