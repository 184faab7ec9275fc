//! InfluxDB line protocol encoding
//!
//! `measurement field1=1.5,field2=-3 1704067200` with second precision.

use contracts::{ContractError, TimeSeriesPoint};

fn escape(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a measurement name
pub fn escape_measurement(name: &str) -> String {
    escape(name, &['\\', ',', ' '])
}

/// Escape a field key
pub fn escape_key(key: &str) -> String {
    escape(key, &['\\', ',', '=', ' '])
}

/// Encode one point
///
/// # Errors
/// `Forward` if the point has no fields or a non-finite value.
pub fn encode_point(point: &TimeSeriesPoint) -> Result<String, ContractError> {
    if point.fields.is_empty() {
        return Err(ContractError::forward(format!(
            "point '{}' has no fields",
            point.measurement
        )));
    }

    let mut fields = Vec::with_capacity(point.fields.len());
    for (key, value) in point.fields.iter() {
        if !value.is_finite() {
            return Err(ContractError::forward(format!(
                "field '{key}' has non-finite value {value}"
            )));
        }
        fields.push(format!("{}={}", escape_key(key), value));
    }

    Ok(format!(
        "{} {} {}",
        escape_measurement(&point.measurement),
        fields.join(","),
        point.time.timestamp()
    ))
}

/// Encode a batch, one line per point
pub fn encode_points(points: &[TimeSeriesPoint]) -> Result<String, ContractError> {
    let lines = points
        .iter()
        .map(encode_point)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
