//! Manifest reading
//!
//! Plain text, one record per line, whitespace-separated columns.
//! Empty lines and lines starting with `#` are skipped.

use std::path::Path;

use contracts::{ContractError, SensorEntry, SensorManifest};

/// Number of columns in a sensor manifest (address, name)
pub const MANIFEST_COLUMNS: usize = 2;

/// Read a text file as an ordered list of tuples with `expected_columns` items
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `ManifestFormat` naming the 1-based line with the wrong column count
pub fn read_tuples(path: &Path, expected_columns: usize) -> Result<Vec<Vec<String>>, ContractError> {
    let content = std::fs::read_to_string(path)?;
    parse_tuples(&content, path, expected_columns)
}

/// Parse tuples from already loaded content; `path` is only used in errors
pub fn parse_tuples(
    content: &str,
    path: &Path,
    expected_columns: usize,
) -> Result<Vec<Vec<String>>, ContractError> {
    let mut tuples = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if fields.len() != expected_columns {
            return Err(ContractError::manifest_format(path, idx + 1, expected_columns));
        }
        tuples.push(fields);
    }
    Ok(tuples)
}

/// Turn two-column tuples into a sensor manifest
pub(crate) fn into_manifest(tuples: Vec<Vec<String>>) -> SensorManifest {
    tuples
        .into_iter()
        .filter_map(|t| {
            let mut it = t.into_iter();
            Some(SensorEntry::new(it.next()?, it.next()?))
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
# one-wire sensors
28.AA00000001   kitchen

   # indented comment
28.BB00000002\tattic
";

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let tuples = parse_tuples(SAMPLE, Path::new("sensors.txt"), 2).unwrap();
        assert_eq!(
            tuples,
            vec![
                vec!["28.AA00000001".to_string(), "kitchen".to_string()],
                vec!["28.BB00000002".to_string(), "attic".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_wrong_column_count_names_line() {
        let content = "28.AA kitchen\n\n28.BB attic extra\n";
        let err = parse_tuples(content, Path::new("sensors.txt"), 2).unwrap_err();
        match err {
            ContractError::ManifestFormat {
                path,
                line,
                expected,
            } => {
                assert_eq!(path, Path::new("sensors.txt"));
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_single_column_rejected() {
        let err = parse_tuples("# header\n28.AA\n", Path::new("s"), 2).unwrap_err();
        assert!(err.to_string().starts_with("s:2 "), "got: {err}");
    }

    #[test]
    fn test_parse_other_column_counts() {
        let tuples = parse_tuples("a b c\nd e f\n", Path::new("t"), 3).unwrap();
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[1], vec!["d", "e", "f"]);
    }

    #[test]
    fn test_parse_crlf_lines() {
        let tuples = parse_tuples("28.AA kitchen\r\n28.BB attic\r\n", Path::new("t"), 2).unwrap();
        assert_eq!(tuples[1][1], "attic");
    }

    #[test]
    fn test_read_tuples_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let tuples = read_tuples(file.path(), 2).unwrap();
        assert_eq!(tuples.len(), 2);
    }

    #[test]
    fn test_read_tuples_missing_file() {
        let err = read_tuples(Path::new("/nonexistent/sensors.txt"), 2).unwrap_err();
        assert!(matches!(err, ContractError::Io(_)));
    }

    #[test]
    fn test_into_manifest_keeps_order() {
        let tuples = parse_tuples(SAMPLE, Path::new("s"), 2).unwrap();
        let manifest = into_manifest(tuples);
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries()[0], SensorEntry::new("28.AA00000001", "kitchen"));
    }
}
