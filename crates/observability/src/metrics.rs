//! Poll loop metrics
//!
//! Prometheus counters via the `metrics` facade plus an in-memory
//! aggregate for the shutdown summary.

use std::collections::BTreeMap;

use metrics::{counter, histogram};

/// Record one sensor read attempt
pub fn record_sensor_read(sensor: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "owtemp_sensor_reads_total",
        "sensor" => sensor.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record one forward attempt to the time-series database
pub fn record_forward(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("owtemp_forward_total", "status" => status).increment(1);
}

/// Record a logfile switch
pub fn record_rotation() {
    counter!("owtemp_logfile_rotations_total").increment(1);
}

/// Record a completed cycle
pub fn record_cycle(duration_ms: f64) {
    counter!("owtemp_cycles_total").increment(1);
    histogram!("owtemp_cycle_duration_ms").record(duration_ms);
}

/// Poll statistics aggregate
#[derive(Debug, Clone, Default)]
pub struct PollStats {
    /// Completed cycles
    pub cycles: u64,

    /// Rows written to the sink
    pub rows_written: u64,

    /// Successful forwards
    pub forwards_ok: u64,

    /// Failed forwards (dropped records)
    pub forwards_failed: u64,

    /// Destination switches, including the first open
    pub rotations: u64,

    /// Failed reads per sensor name
    pub read_failures: BTreeMap<String, u64>,

    /// Cycle duration statistics (ms)
    pub cycle_ms: RunningStats,
}

impl PollStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read_failure(&mut self, sensor: &str) {
        *self.read_failures.entry(sensor.to_string()).or_insert(0) += 1;
    }

    pub fn record_cycle(&mut self, duration_ms: f64, forwarded: bool, rotated: bool) {
        self.cycles += 1;
        self.rows_written += 1;
        if forwarded {
            self.forwards_ok += 1;
        } else {
            self.forwards_failed += 1;
        }
        if rotated {
            self.rotations += 1;
        }
        self.cycle_ms.push(duration_ms);
    }

    pub fn total_read_failures(&self) -> u64 {
        self.read_failures.values().sum()
    }

    pub fn summary(&self) -> PollStatsSummary {
        PollStatsSummary {
            cycles: self.cycles,
            rows_written: self.rows_written,
            forwards_ok: self.forwards_ok,
            forwards_failed: self.forwards_failed,
            rotations: self.rotations,
            read_failures: self.read_failures.clone(),
            cycle_ms: StatsSummary::from(&self.cycle_ms),
        }
    }
}

/// Snapshot of PollStats for display
#[derive(Debug, Clone, Default)]
pub struct PollStatsSummary {
    pub cycles: u64,
    pub rows_written: u64,
    pub forwards_ok: u64,
    pub forwards_failed: u64,
    pub rotations: u64,
    pub read_failures: BTreeMap<String, u64>,
    pub cycle_ms: StatsSummary,
}

impl std::fmt::Display for PollStatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Poll Summary ===")?;
        writeln!(f, "Cycles: {}", self.cycles)?;
        writeln!(f, "Rows written: {}", self.rows_written)?;
        writeln!(
            f,
            "Forwards: {} ok, {} failed",
            self.forwards_ok, self.forwards_failed
        )?;
        writeln!(f, "Logfiles opened: {}", self.rotations)?;
        writeln!(f, "Cycle duration (ms): {}", self.cycle_ms)?;

        if !self.read_failures.is_empty() {
            writeln!(f, "Read failures:")?;
            for (sensor, count) in &self.read_failures {
                writeln!(f, "  {}: {}", sensor, count)?;
            }
        }

        Ok(())
    }
}

/// Running statistics (Welford)
#[derive(Debug, Clone)]
pub struct RunningStats {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    mean: f64,
    m2: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            m2: 0.0,
        }
    }
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}
