//! `run` command implementation.

use anyhow::{Context, Result};
use config_loader::{manifest_warnings, ConfigLoader, DaemonConfig, ManifestLoader, SensorManifest};
use dispatcher::{create_sink, ConfiguredWriter, FilenamePattern};
use ingestion::OwServerClient;
use poller::{EngineConfig, PollCycleEngine};
use tracing::{info, warn};

use super::load_config;
use crate::cli::RunArgs;
use crate::error::{require_file, CliError};

/// Execute the `run` command
pub async fn run_poller(args: &RunArgs) -> Result<()> {
    require_file("Sensor list", &args.sensorlist)?;
    let manifest = ManifestLoader::load_from_path(&args.sensorlist)
        .with_context(|| format!("Failed to load sensor list from {}", args.sensorlist.display()))?;
    for warning in manifest_warnings(&manifest) {
        warn!(sensorlist = %args.sensorlist.display(), "{warning}");
    }

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    ConfigLoader::validate(&config).map_err(|e| CliError::config_validation(e.to_string()))?;

    info!(
        sensors = manifest.len(),
        owserver = %format!("{}:{}", config.owserver.host, config.owserver.port),
        influx = config.influxdb.enabled,
        interval_secs = config.poll.interval_secs,
        "Configuration ready"
    );

    if args.dry_run {
        FilenamePattern::from_user(&config.logfile.pattern)
            .context("Invalid logfile pattern")?;
        info!("Dry run mode - inputs are valid, exiting");
        print_summary(&manifest, &config);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let source = OwServerClient::new(&config.owserver).context("Failed to create owserver client")?;
    let writer = ConfiguredWriter::from_config(&config.influxdb)
        .context("Failed to create time-series writer")?;
    let sink = create_sink(&config.logfile).context("Failed to create logfile sink")?;

    let engine_config = EngineConfig {
        interval: config.poll.interval()?,
        measurement: config.influxdb.measurement.clone(),
        max_cycles: (args.max_cycles != 0).then_some(args.max_cycles),
    };
    let mut engine = PollCycleEngine::new(manifest, source, writer, sink, engine_config);

    let stats = engine
        .run(shutdown_signal())
        .await
        .map_err(|e| CliError::poll_loop(e.to_string()))?;

    // Rows may be on stdout; keep the summary off it.
    eprintln!("{}", stats.summary());
    info!(cycles = stats.cycles, "owtemp finished");
    Ok(())
}

/// CLI flags win over the config file
fn apply_overrides(config: &mut DaemonConfig, args: &RunArgs) {
    if let Some(ref pattern) = args.filefmt {
        config.logfile.pattern = pattern.clone();
    }
    if args.stdout {
        config.logfile.stdout = true;
    }
    if let Some(interval) = args.interval {
        config.poll.interval_secs = interval;
    }
    if let Some(ref host) = args.owserver_host {
        info!(host = %host, "Overriding owserver host from CLI");
        config.owserver.host = host.clone();
    }
    if let Some(port) = args.owserver_port {
        config.owserver.port = port;
    }
    if let Some(ref url) = args.influx_url {
        config.influxdb.url = url.clone();
    }
    if let Some(ref database) = args.database {
        config.influxdb.database = database.clone();
    }
    if args.no_influx {
        config.influxdb.enabled = false;
    }
}

/// Resolve on Ctrl+C or SIGTERM
///
/// A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Received shutdown signal");
}

/// Print configuration summary for dry-run mode
fn print_summary(manifest: &SensorManifest, config: &DaemonConfig) {
    println!("\n=== Configuration Summary ===\n");
    println!("Sensors ({}):", manifest.len());
    for entry in manifest {
        println!("  - {} ({})", entry.name, entry.address);
    }

    println!("\nowserver: {}:{}", config.owserver.host, config.owserver.port);
    if config.influxdb.enabled {
        println!(
            "InfluxDB: {} (database {}, measurement {})",
            config.influxdb.url, config.influxdb.database, config.influxdb.measurement
        );
    } else {
        println!("InfluxDB: disabled");
    }
    if config.logfile.stdout {
        println!("Rows: stdout");
    } else {
        println!("Rows: {}", config.logfile.pattern);
    }
    println!("Interval: {}s", config.poll.interval_secs);
    println!();
}
