//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// owtemp - one-wire temperature logger
#[derive(Parser, Debug)]
#[command(
    name = "owtemp",
    author,
    version,
    about = "One-wire temperature logger",
    long_about = "Polls one-wire temperature sensors through owserver, appends one row per \n\
                  cycle to a date-rotated logfile (or stdout) and forwards every reading \n\
                  to InfluxDB."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "OWTEMP_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "OWTEMP_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the poll loop
    Run(RunArgs),

    /// Validate sensor list and configuration without polling
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Sensor list: one `<address> <name>` pair per line
    pub sensorlist: PathBuf,

    /// Logfile name pattern, strftime-like with `@` instead of `%`
    #[arg(short = 'f', long = "filefmt", env = "OWTEMP_FILEFMT")]
    pub filefmt: Option<String>,

    /// Write rows to stdout instead of the logfile
    #[arg(short, long)]
    pub stdout: bool,

    /// Seconds between polls
    #[arg(short = 't', long = "time", env = "OWTEMP_INTERVAL")]
    pub interval: Option<f64>,

    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "OWTEMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override owserver host
    #[arg(long, env = "OWTEMP_OWSERVER_HOST")]
    pub owserver_host: Option<String>,

    /// Override owserver port
    #[arg(long, env = "OWTEMP_OWSERVER_PORT")]
    pub owserver_port: Option<u16>,

    /// Override InfluxDB base URL
    #[arg(long, env = "OWTEMP_INFLUX_URL")]
    pub influx_url: Option<String>,

    /// Override InfluxDB database
    #[arg(long, env = "OWTEMP_DATABASE")]
    pub database: Option<String>,

    /// Do not forward readings to InfluxDB
    #[arg(long)]
    pub no_influx: bool,

    /// Stop after this many cycles (0 = unlimited)
    #[arg(long, default_value = "0", env = "OWTEMP_MAX_CYCLES")]
    pub max_cycles: u64,

    /// Validate inputs, print a summary and exit without polling
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "OWTEMP_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Sensor list to validate
    pub sensorlist: PathBuf,

    /// Configuration file to validate alongside
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
