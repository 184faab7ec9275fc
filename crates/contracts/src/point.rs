//! TimeSeriesPoint - PointWriter input
//!
//! One record per cycle: fixed measurement, cycle time, one field per
//! successfully read sensor.

use chrono::{DateTime, Utc};

use crate::ReadingSet;

/// Time-series record forwarded to the database
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    /// Measurement name (e.g., "heating")
    pub measurement: String,

    /// Cycle timestamp
    pub time: DateTime<Utc>,

    /// Field values; sensors missing this cycle are absent
    pub fields: ReadingSet,
}

impl TimeSeriesPoint {
    pub fn new(measurement: impl Into<String>, time: DateTime<Utc>, fields: ReadingSet) -> Self {
        Self {
            measurement: measurement.into(),
            time,
            fields,
        }
    }
}
