//! Row formatting
//!
//! Log rows look like `2024-01-01T12:00:00Z  +21.50 -       -3.25`: the
//! cycle timestamp, then one 7-character field per manifest entry.

use chrono::{DateTime, Utc};
use contracts::{ReadingSet, SensorManifest};

/// Width of one value field
pub const FIELD_WIDTH: usize = 7;

/// Field written for a sensor without a reading this cycle
pub const MISSING_FIELD: &str = "-      ";

/// Timestamp format of log rows
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Header prefix marking comment lines
pub const COMMENT_MARKER: &str = "#";

/// Signed, two decimals, right-aligned
pub fn format_value(value: f64) -> String {
    format!("{value:+7.2}")
}

/// Fields for every manifest entry, in manifest order, joined by one space
pub fn format_sensor_line(manifest: &SensorManifest, readings: &ReadingSet) -> String {
    manifest
        .iter()
        .map(|entry| match readings.get(&entry.name) {
            Some(value) => format_value(value),
            None => MISSING_FIELD.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Header comment listing sensor names in manifest order
pub fn format_header(manifest: &SensorManifest) -> String {
    let names: Vec<&str> = manifest.names().collect();
    format!("{COMMENT_MARKER} {}\n", names.join(" "))
}

/// Row timestamp text
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(ROW_TIMESTAMP_FORMAT).to_string()
}

/// Complete data row including the trailing newline
pub fn format_row(ts: &DateTime<Utc>, manifest: &SensorManifest, readings: &ReadingSet) -> String {
    format!(
        "{} {}\n",
        format_timestamp(ts),
        format_sensor_line(manifest, readings)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::SensorEntry;

    fn kitchen_attic() -> SensorManifest {
        SensorManifest::new(vec![
            SensorEntry::new("28.AA", "kitchen"),
            SensorEntry::new("28.BB", "attic"),
        ])
    }

    #[test]
    fn test_missing_sensor_placeholder() {
        let mut readings = ReadingSet::new();
        readings.insert("kitchen", 21.5);
        assert_eq!(
            format_sensor_line(&kitchen_attic(), &readings),
            " +21.50 -      "
        );
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(21.5), " +21.50");
        assert_eq!(format_value(-3.254), "  -3.25");
        assert_eq!(format_value(0.0), "  +0.00");
        assert_eq!(format_value(-12.5), " -12.50");
        assert_eq!(format_value(85.0).len(), FIELD_WIDTH);
        assert_eq!(MISSING_FIELD.len(), FIELD_WIDTH);
    }

    #[test]
    fn test_round_trip_two_decimals() {
        let manifest = SensorManifest::new(vec![
            SensorEntry::new("28.01", "a"),
            SensorEntry::new("28.02", "b"),
            SensorEntry::new("28.03", "c"),
        ]);
        let values = [("a", 21.5625), ("b", -7.1875), ("c", 99.994)];
        let readings: ReadingSet = values.iter().map(|(n, v)| (n.to_string(), *v)).collect();

        let line = format_sensor_line(&manifest, &readings);
        let parsed: Vec<f64> = line
            .split_whitespace()
            .map(|f| f.parse().unwrap())
            .collect();

        assert_eq!(parsed.len(), 3);
        for ((_, original), reparsed) in values.iter().zip(parsed) {
            assert!((original - reparsed).abs() <= 0.005 + f64::EPSILON);
        }
    }

    #[test]
    fn test_empty_readings_all_placeholders() {
        let line = format_sensor_line(&kitchen_attic(), &ReadingSet::new());
        assert_eq!(line, format!("{MISSING_FIELD} {MISSING_FIELD}"));
    }

    #[test]
    fn test_header() {
        assert_eq!(format_header(&kitchen_attic()), "# kitchen attic\n");
    }

    #[test]
    fn test_row() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 5).unwrap();
        let mut readings = ReadingSet::new();
        readings.insert("attic", -3.25);
        assert_eq!(
            format_row(&ts, &kitchen_attic(), &readings),
            format!("2024-01-01T12:00:05Z {MISSING_FIELD}   -3.25\n")
        );
    }
}
