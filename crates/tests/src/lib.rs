//! # Integration Tests
//!
//! End-to-end tests of the poll loop with mock capabilities.
//!
//! Covers:
//! - Sensor list file -> engine -> rotating logfile
//! - Sensor failures, forward failures, rotation across midnight

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::sync::Mutex;

    use chrono::{DateTime, TimeZone, Utc};
    use config_loader::ManifestLoader;
    use contracts::{ContractError, PointWriter, SensorManifest, TimeSeriesPoint};
    use dispatcher::{FilenamePattern, FixedSink, RotatingSink, MISSING_FIELD};
    use ingestion::MockTemperatureSource;
    use poller::{EngineConfig, PollCycleEngine};

    /// PointWriter recording every forwarded point
    #[derive(Default)]
    struct RecordingWriter {
        points: Mutex<Vec<TimeSeriesPoint>>,
        fail: bool,
    }

    impl RecordingWriter {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn points(&self) -> Vec<TimeSeriesPoint> {
            self.points.lock().unwrap().clone()
        }
    }

    impl PointWriter for RecordingWriter {
        fn name(&self) -> &str {
            "recording"
        }

        async fn write_points(&self, points: &[TimeSeriesPoint]) -> Result<(), ContractError> {
            self.points.lock().unwrap().extend_from_slice(points);
            if self.fail {
                Err(ContractError::forward("database unreachable"))
            } else {
                Ok(())
            }
        }
    }

    fn load_manifest(dir: &Path) -> SensorManifest {
        let path = dir.join("sensors.txt");
        std::fs::write(
            &path,
            "# address  name\n28.AA kitchen\n\n28.BB attic\n",
        )
        .unwrap();
        ManifestLoader::load_from_path(&path).unwrap()
    }

    fn rotating_sink(dir: &Path) -> RotatingSink {
        let pattern =
            FilenamePattern::from_user(&format!("{}/log_@Y-@m-@d", dir.display())).unwrap();
        RotatingSink::new("logfile", pattern)
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    /// Sensor list -> engine -> logfile, with header and rows
    #[tokio::test]
    async fn test_e2e_rows_in_logfile() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load_manifest(dir.path());
        assert_eq!(manifest.len(), 2);

        let source = MockTemperatureSource::new()
            .with_value("28.AA", "21.5")
            .with_value("28.BB", "4.25");
        let mut engine = PollCycleEngine::new(
            manifest,
            source,
            RecordingWriter::default(),
            rotating_sink(dir.path()),
            EngineConfig::default(),
        );

        let first = engine.run_cycle_at(at(2024, 3, 1, 8, 0, 0)).await.unwrap();
        assert!(first.rotated);
        assert!(first.header_written);
        let second = engine.run_cycle_at(at(2024, 3, 1, 8, 0, 15)).await.unwrap();
        assert!(!second.rotated);
        assert!(!second.header_written);

        let content = std::fs::read_to_string(dir.path().join("log_2024-03-01")).unwrap();
        assert_eq!(
            content,
            "# kitchen attic\n\
             2024-03-01T08:00:00Z  +21.50   +4.25\n\
             2024-03-01T08:00:15Z  +21.50   +4.25\n"
        );
        assert_eq!(engine.writer().points().len(), 2);
        assert_eq!(engine.stats().rotations, 1);
    }

    /// Kitchen fails twice: placeholder in both rows, forward still attempted
    #[tokio::test]
    async fn test_e2e_sensor_fails_twice() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load_manifest(dir.path());

        let source = MockTemperatureSource::new()
            .with_sequence("28.AA", vec![Err("crc error"), Err("crc error"), Ok("20.0")])
            .with_value("28.BB", "5");
        let mut engine = PollCycleEngine::new(
            manifest,
            source,
            RecordingWriter::default(),
            FixedSink::new("mem", "<memory>", Vec::new()),
            EngineConfig::default(),
        );

        for s in 0..3 {
            engine.run_cycle_at(at(2024, 1, 1, 0, 0, s)).await.unwrap();
        }

        assert_eq!(engine.stats().read_failures.get("kitchen"), Some(&2));
        let points = engine.writer().points();
        assert_eq!(points.len(), 3);
        assert!(!points[0].fields.contains("kitchen"));
        assert!(!points[1].fields.contains("kitchen"));
        assert_eq!(points[2].fields.get("kitchen"), Some(20.0));

        let out = String::from_utf8(engine.sink().get_ref().clone()).unwrap();
        let rows: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].ends_with(&format!("{MISSING_FIELD}   +5.00")));
        assert!(rows[1].ends_with(&format!("{MISSING_FIELD}   +5.00")));
        assert!(rows[2].ends_with(" +20.00   +5.00"));
    }

    /// All sensors fail: empty row fields, forward of an empty point attempted
    #[tokio::test]
    async fn test_e2e_all_sensors_fail() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load_manifest(dir.path());

        let mut engine = PollCycleEngine::new(
            manifest,
            MockTemperatureSource::new(),
            RecordingWriter::default(),
            FixedSink::new("mem", "<memory>", Vec::new()),
            EngineConfig::default(),
        );

        let report = engine.run_cycle_at(at(2024, 1, 1, 0, 0, 0)).await.unwrap();
        assert_eq!(report.failures.len(), 2);
        assert!(report.readings.is_empty());

        let points = engine.writer().points();
        assert_eq!(points.len(), 1);
        assert!(points[0].fields.is_empty());

        let out = String::from_utf8(engine.sink().get_ref().clone()).unwrap();
        assert!(out.ends_with(&format!("{MISSING_FIELD} {MISSING_FIELD}\n")));
    }

    /// Midnight rotation: old file untouched, header repeated in new file
    #[tokio::test]
    async fn test_e2e_rotation_at_midnight() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load_manifest(dir.path());

        let source = MockTemperatureSource::new()
            .with_value("28.AA", "19")
            .with_value("28.BB", "1");
        let mut engine = PollCycleEngine::new(
            manifest,
            source,
            RecordingWriter::default(),
            rotating_sink(dir.path()),
            EngineConfig::default(),
        );

        engine.run_cycle_at(at(2024, 1, 1, 23, 59, 50)).await.unwrap();
        let report = engine.run_cycle_at(at(2024, 1, 2, 0, 0, 5)).await.unwrap();
        assert!(report.rotated);
        assert!(report.header_written);

        let old = std::fs::read_to_string(dir.path().join("log_2024-01-01")).unwrap();
        let new = std::fs::read_to_string(dir.path().join("log_2024-01-02")).unwrap();

        assert_eq!(old.lines().count(), 2);
        assert!(old.contains("2024-01-01T23:59:50Z"));
        assert!(!old.contains("2024-01-02"));

        assert!(new.starts_with("# kitchen attic\n"));
        assert!(new.contains("2024-01-02T00:00:05Z"));
        assert_eq!(engine.stats().rotations, 2);
    }

    /// Forward failures are logged and dropped; rows keep flowing
    #[tokio::test]
    async fn test_e2e_forward_failure_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load_manifest(dir.path());

        let source = MockTemperatureSource::new()
            .with_value("28.AA", "21")
            .with_value("28.BB", "22");
        let mut engine = PollCycleEngine::new(
            manifest,
            source,
            RecordingWriter::failing(),
            rotating_sink(dir.path()),
            EngineConfig::default(),
        );

        for s in [0, 15, 30] {
            let report = engine.run_cycle_at(at(2024, 6, 1, 12, 0, s)).await.unwrap();
            assert!(!report.forwarded());
        }

        let content = std::fs::read_to_string(dir.path().join("log_2024-06-01")).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert_eq!(engine.stats().forwards_failed, 3);
        assert_eq!(engine.stats().forwards_ok, 0);
    }

    /// Appending to an existing file of the same day writes a new header
    #[tokio::test]
    async fn test_e2e_restart_appends_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = load_manifest(dir.path());
        std::fs::write(dir.path().join("log_2024-01-01"), "# kitchen attic\nold row\n").unwrap();

        let source = MockTemperatureSource::new()
            .with_value("28.AA", "21")
            .with_value("28.BB", "22");
        let mut engine = PollCycleEngine::new(
            manifest,
            source,
            RecordingWriter::default(),
            rotating_sink(dir.path()),
            EngineConfig::default(),
        );
        engine.run_cycle_at(at(2024, 1, 1, 10, 0, 0)).await.unwrap();
        drop(engine);

        let content = std::fs::read_to_string(dir.path().join("log_2024-01-01")).unwrap();
        assert!(content.starts_with("# kitchen attic\nold row\n"));
        assert_eq!(content.matches("# kitchen attic").count(), 2);
    }
}
