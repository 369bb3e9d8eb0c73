// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! TankWatch - Water Tank Telemetry Monitor
//!
//! Runs the monitoring engine headless against the tank simulator and logs
//! every reading, status change and alert.

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tankwatch::core::{FixedTicks, IntervalTicks, PeriodicTask, SharedMonitor};
use tankwatch::{Config, Monitor, MonitorEvent, ReportExporter, Scheduler, VERSION};

/// TankWatch - Water Tank Telemetry Monitor
#[derive(Parser, Debug)]
#[command(name = "tankwatch")]
#[command(author = "TankWatch Project")]
#[command(version = VERSION)]
#[command(about = "Simulated water tank telemetry with consumption estimates and alerts")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Run this many ticks back-to-back, then exit
    #[arg(long)]
    ticks: Option<usize>,

    /// Seconds between ticks
    #[arg(long)]
    interval: Option<u64>,

    /// Simulator RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write a report of the history window on shutdown
    #[arg(long)]
    export: bool,

    /// Data output directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Initialize logging; flags win over the configured level
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        config.log_level()?
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("💧 {} v{} - Water Tank Telemetry Monitor", config.app_name, VERSION);

    // Override with command line args
    if let Some(interval) = args.interval {
        config.monitor.tick_interval_secs = interval;
    }
    if let Some(seed) = args.seed {
        config.simulator.seed = Some(seed);
    }
    if let Some(data_dir) = args.data_dir.clone() {
        config.export.path = data_dir.join("reports");
        config.data_dir = data_dir;
    }
    config.validate()?;

    info!("Configuration loaded from {:?}", config_path);

    let monitor = Monitor::simulated(config.monitor.clone(), &config.simulator)?;
    let monitor: SharedMonitor = Arc::new(Mutex::new(monitor));

    let log_task = tokio::spawn(log_events(monitor.lock().subscribe()));
    let scheduler = Scheduler::new(monitor.clone());

    match args.ticks {
        Some(count) => {
            let completed = scheduler.spawn(FixedTicks::new(count)).join().await?;
            info!("Completed {} ticks", completed);
        }
        None => {
            let task = scheduler.spawn(IntervalTicks::new(config.monitor.tick_interval()));
            info!("🚀 {} running, one reading every {}s", config.app_name, config.monitor.tick_interval_secs);
            info!("   Press Ctrl+C to shutdown");
            wait_for_shutdown(task).await?;
        }
    }

    let aggregate = monitor.lock().aggregate_snapshot();
    info!(
        "Session totals: {} packets, {:.2} m³ today, {:.1} m³ month estimate",
        aggregate.packet_count, aggregate.consumption_today, aggregate.consumption_month
    );

    if args.export {
        export_report(&monitor, &config)?;
    }

    // Dropping the last monitor handle closes the event channel; the logger
    // drains what is buffered and then exits
    drop(scheduler);
    drop(monitor);
    log_task.await?;
    info!("{} shutdown complete", config.app_name);

    Ok(())
}

async fn wait_for_shutdown(task: PeriodicTask) -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, cleaning up...");
    task.cancel();
    task.join().await?;
    Ok(())
}

fn export_report(monitor: &SharedMonitor, config: &Config) -> Result<()> {
    let report = match monitor.lock().report() {
        Ok(report) => report,
        Err(e) => {
            warn!("Report skipped: {}", e);
            return Ok(());
        }
    };

    let exporter = ReportExporter::new(&config.export.path, config.export.format)?;
    let path = exporter.export(&report)?;
    info!("Report written to {:?}", path);
    Ok(())
}

async fn log_events(mut rx: broadcast::Receiver<MonitorEvent>) {
    loop {
        match rx.recv().await {
            Ok(MonitorEvent::Ingestion(event)) => {
                let r = &event.reading;
                info!(
                    "#{} level {}% ({:?}) flow {:.2} m³/h status {} | today {:.2} m³ month {:.1} m³",
                    event.aggregate.packet_count,
                    r.level,
                    event.level_band,
                    r.flow,
                    event.status.label(),
                    event.aggregate.consumption_today,
                    event.aggregate.consumption_month
                );
                if let (Some(ph), Some(quality), Some(potable)) = (r.ph, r.quality, r.potable) {
                    info!("   quality {} pH {:.1} potable {}", quality, ph, potable);
                }
            }
            Ok(MonitorEvent::ManualAlert(alert)) => info!("Manual alert: {}", alert.message),
            Ok(MonitorEvent::HistoryCleared) => info!("History cleared"),
            Err(broadcast::error::RecvError::Lagged(n)) => warn!("Event log lagged by {} events", n),
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
