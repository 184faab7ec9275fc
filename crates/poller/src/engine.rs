//! Poll cycle engine.

use std::future::Future;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use contracts::{
    ContractError, LogSink, PointWriter, ReadingSet, SensorManifest, TemperatureSource,
    TimeSeriesPoint, DEFAULT_INTERVAL_SECS,
};
use dispatcher::{format_header, format_row};
use observability::PollStats;
use tracing::{debug, info, instrument, warn};

use crate::reading::parse_reading;
use crate::PollerError;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sleep between cycles
    pub interval: Duration,

    /// Measurement name of forwarded points
    pub measurement: String,

    /// Stop after this many cycles (None = run until shutdown)
    pub max_cycles: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            measurement: "heating".to_string(),
            max_cycles: None,
        }
    }
}

/// Sensor that could not be read in a cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SensorFailure {
    pub name: String,
    pub address: String,
    pub error: String,
}

/// Outcome of one cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,

    /// Timestamp shared by row and point
    pub timestamp: DateTime<Utc>,

    /// Values read this cycle
    pub readings: ReadingSet,

    /// Sensors skipped this cycle
    pub failures: Vec<SensorFailure>,

    /// The sink switched destination during this cycle
    pub rotated: bool,

    /// A header line preceded the row
    pub header_written: bool,

    /// Forward error, if the point was dropped
    pub forward_error: Option<String>,
}

impl CycleReport {
    pub fn forwarded(&self) -> bool {
        self.forward_error.is_none()
    }
}

/// Main poll loop
///
/// Owns the manifest, both capabilities and the sink for the lifetime of the
/// process. Nothing is shared; every cycle runs to completion before the
/// next one starts.
pub struct PollCycleEngine<S, W, L> {
    manifest: SensorManifest,
    source: S,
    writer: W,
    sink: L,
    config: EngineConfig,
    cycle: u64,
    stats: PollStats,
}

impl<S, W, L> PollCycleEngine<S, W, L>
where
    S: TemperatureSource,
    W: PointWriter,
    L: LogSink,
{
    /// Create a new engine
    pub fn new(manifest: SensorManifest, source: S, writer: W, sink: L, config: EngineConfig) -> Self {
        Self {
            manifest,
            source,
            writer,
            sink,
            config,
            cycle: 0,
            stats: PollStats::new(),
        }
    }

    pub fn manifest(&self) -> &SensorManifest {
        &self.manifest
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    /// Read every sensor once, in manifest order
    ///
    /// Failed sensors are logged and left out of the reading set.
    pub async fn read_sensors(&self) -> (ReadingSet, Vec<SensorFailure>) {
        let mut readings = ReadingSet::new();
        let mut failures = Vec::new();

        for entry in &self.manifest {
            let result = match self.source.read(&entry.address).await {
                Ok(raw) => parse_reading(&entry.address, &raw),
                Err(e) => Err(e),
            };

            match result {
                Ok(value) => {
                    debug!(sensor = %entry.name, address = %entry.address, value, "Sensor read");
                    observability::record_sensor_read(&entry.name, true);
                    readings.insert(entry.name.clone(), value);
                }
                Err(e) => {
                    warn!(
                        sensor = %entry.name,
                        address = %entry.address,
                        error = %e,
                        "Cannot read sensor"
                    );
                    observability::record_sensor_read(&entry.name, false);
                    failures.push(SensorFailure {
                        name: entry.name.clone(),
                        address: entry.address.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        (readings, failures)
    }

    /// Run one cycle stamped with the wall clock
    ///
    /// The timestamp is taken once every sensor has been read, so row, point
    /// and logfile selection all reflect when the values were collected.
    ///
    /// # Errors
    /// Only sink failures; sensor and forward failures are part of the report.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, PollerError> {
        self.cycle_with_clock(Utc::now).await
    }

    /// Run one cycle stamped with `now` instead of the wall clock
    pub async fn run_cycle_at(&mut self, now: DateTime<Utc>) -> Result<CycleReport, PollerError> {
        self.cycle_with_clock(move || now).await
    }

    #[instrument(name = "poll_cycle", skip_all, fields(cycle = self.cycle + 1))]
    async fn cycle_with_clock<C>(&mut self, clock: C) -> Result<CycleReport, PollerError>
    where
        C: FnOnce() -> DateTime<Utc>,
    {
        let started = Instant::now();
        self.cycle += 1;

        let (readings, failures) = self.read_sensors().await;
        for failure in &failures {
            self.stats.record_read_failure(&failure.name);
        }
        let now = clock();

        let (rotated, header_written) = self
            .write_row(now, &readings)
            .map_err(|e| PollerError::sink(self.sink.name(), e))?;
        if rotated {
            observability::record_rotation();
        }

        let forward_error = self.forward(now, &readings).await.err().map(|e| e.to_string());

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        observability::record_cycle(elapsed_ms);
        self.stats
            .record_cycle(elapsed_ms, forward_error.is_none(), rotated);

        Ok(CycleReport {
            cycle: self.cycle,
            timestamp: now,
            readings,
            failures,
            rotated,
            header_written,
            forward_error,
        })
    }

    /// Select the destination, write header if fresh, write and flush the row
    fn write_row(&mut self, now: DateTime<Utc>, readings: &ReadingSet) -> Result<(bool, bool), ContractError> {
        let before = self.sink.destination().map(str::to_owned);
        self.sink.update(now)?;
        let rotated = self.sink.destination() != before.as_deref();

        let header_written = self.sink.is_fresh();
        if header_written {
            self.sink.write(format_header(&self.manifest).as_bytes())?;
        }

        self.sink
            .write(format_row(&now, &self.manifest, readings).as_bytes())?;
        self.sink.flush()?;
        Ok((rotated, header_written))
    }

    /// Forward the cycle's point; failures are logged, never retried
    async fn forward(&self, now: DateTime<Utc>, readings: &ReadingSet) -> Result<(), ContractError> {
        let point = TimeSeriesPoint::new(&self.config.measurement, now, readings.clone());
        let result = self.writer.write_points(std::slice::from_ref(&point)).await;

        match &result {
            Ok(()) => observability::record_forward(true),
            Err(e) => {
                warn!(writer = %self.writer.name(), error = %e, "Cannot write data to time-series database");
                observability::record_forward(false);
            }
        }
        result
    }

    /// Run cycles until `shutdown` resolves or `max_cycles` is reached
    ///
    /// The shutdown future is only observed while sleeping between cycles, so
    /// a started cycle always completes. The sink is closed on every exit
    /// path.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<PollStats, PollerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            sensors = self.manifest.len(),
            interval_secs = self.config.interval.as_secs_f64(),
            sink = %self.sink.name(),
            writer = %self.writer.name(),
            "Poll loop started"
        );

        let outcome = loop {
            if let Err(e) = self.run_cycle().await {
                break Err(e);
            }

            if self.config.max_cycles.is_some_and(|max| self.cycle >= max) {
                info!(cycles = self.cycle, "Cycle limit reached");
                break Ok(());
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = &mut shutdown => {
                    info!(cycles = self.cycle, "Shutdown requested");
                    break Ok(());
                }
            }
        };

        let closed = self
            .sink
            .close()
            .map_err(|e| PollerError::sink(self.sink.name(), e));
        outcome?;
        closed?;

        Ok(self.stats.clone())
    }
}
