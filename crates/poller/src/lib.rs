//! # Poller
//!
//! The poll loop: read every sensor, log one row, forward one point, sleep.
//!
//! ## Cycle
//!
//! 1. Read sensors in manifest order; failures are logged and skipped
//! 2. Capture one timestamp for rotation, row text and point time
//! 3. Update the sink; write the header when the destination is fresh
//! 4. Write and flush the data row
//! 5. Forward the point; failures are logged and the point is dropped
//!
//! Sink I/O errors end the loop.

mod engine;
mod error;
mod reading;

pub use engine::{CycleReport, EngineConfig, PollCycleEngine, SensorFailure};
pub use error::PollerError;
pub use reading::parse_reading;
