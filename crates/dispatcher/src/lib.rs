//! # Dispatcher
//!
//! Output module.
//!
//! Responsibilities:
//! - Format log rows (fixed-width fields, header comments)
//! - Write rows to a rotating logfile or a fixed stream
//! - Forward time-series points to InfluxDB

pub mod error;
pub mod format;
pub mod pattern;
pub mod sinks;
pub mod writers;

pub use contracts::{LogSink, PointWriter};
pub use error::DispatcherError;
pub use format::{format_header, format_row, format_sensor_line, format_timestamp, MISSING_FIELD};
pub use pattern::FilenamePattern;
pub use sinks::{create_sink, BoxedLogSink, FixedSink, RotatingSink};
pub use writers::{ConfiguredWriter, InfluxWriter, NullWriter};
