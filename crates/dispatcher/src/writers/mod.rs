//! Point writer implementations
//!
//! Contains InfluxWriter and NullWriter.

mod influx;
pub mod line_protocol;
mod null;

pub use self::influx::InfluxWriter;
pub use self::null::NullWriter;

use contracts::{ContractError, InfluxConfig, PointWriter, TimeSeriesPoint};

/// Writer selected from configuration
pub enum ConfiguredWriter {
    Influx(InfluxWriter),
    Disabled(NullWriter),
}

impl ConfiguredWriter {
    /// InfluxWriter when enabled, NullWriter otherwise
    pub fn from_config(config: &InfluxConfig) -> Result<Self, crate::DispatcherError> {
        if config.enabled {
            Ok(Self::Influx(InfluxWriter::new(config)?))
        } else {
            Ok(Self::Disabled(NullWriter))
        }
    }
}

impl PointWriter for ConfiguredWriter {
    fn name(&self) -> &str {
        match self {
            Self::Influx(w) => w.name(),
            Self::Disabled(w) => w.name(),
        }
    }

    async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<(), ContractError> {
        match self {
            Self::Influx(w) => w.write_points(points).await,
            Self::Disabled(w) => w.write_points(points).await,
        }
    }
}
