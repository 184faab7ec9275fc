//! TemperatureSource trait - Sensor network abstraction
//!
//! Decouples the poll loop from the concrete sensor network client.
//! Real owserver clients and mock sources implement the same interface.

/// Sensor read capability
///
/// Returns the raw textual value of the sensor at `address`. Parsing the
/// value is the caller's job, so a non-numeric answer and a network failure
/// end up in the same per-sensor failure path.
#[trait_variant::make(TemperatureSource: Send)]
pub trait LocalTemperatureSource {
    /// Source name (used for logging)
    fn name(&self) -> &str;

    /// Read the raw value of one sensor
    ///
    /// # Errors
    /// Returns `SensorRead` / `Protocol` / `Io` errors with context
    async fn read(&self, address: &str) -> Result<String, crate::ContractError>;
}
