//! Raw sensor value parsing

use contracts::ContractError;

/// Parse a raw owserver answer into degrees
///
/// Surrounding whitespace is ignored. NaN and infinities are rejected since
/// the time-series database cannot store them.
pub fn parse_reading(address: &str, raw: &str) -> Result<f64, ContractError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|e| ContractError::sensor_read(address, format!("invalid value '{trimmed}': {e}")))?;
    if !value.is_finite() {
        return Err(ContractError::sensor_read(
            address,
            format!("non-finite value '{trimmed}'"),
        ));
    }
    Ok(value)
}
