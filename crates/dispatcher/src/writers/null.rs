//! NullWriter - accepts and discards points

use contracts::{ContractError, PointWriter, TimeSeriesPoint};
use tracing::debug;

/// Writer used when forwarding is disabled
#[derive(Debug, Clone, Default)]
pub struct NullWriter;

impl PointWriter for NullWriter {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<(), ContractError> {
        debug!(points = points.len(), "Forwarding disabled, points discarded");
        Ok(())
    }
}
