// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! TankWatch - Water Tank Telemetry Monitor
//!
//! Monitoring state engine for a water tank installation:
//! - Synthetic tank readings (level, flow, pH, quality grade)
//! - Bounded history window of recent readings
//! - Running consumption estimates
//! - Threshold alert rules with an alert log
//! - Observer events and snapshots for dashboards and report exporters
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        Scheduler                           │
//! │                           ↓ tick                           │
//! │  ┌──────────┐   ┌──────────────────────────────────────┐   │
//! │  │ Reading  │ → │               Monitor                │   │
//! │  │ Source   │   │  History → Aggregator → AlertEngine  │   │
//! │  └──────────┘   └──────────────────────────────────────┘   │
//! │                           ↓                                │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │                    Event Bus                        │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │           ↓                              ↓                 │
//! │     ┌───────────┐                 ┌────────────┐           │
//! │     │ Observers │                 │  Reports   │           │
//! │     └───────────┘                 └────────────┘           │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod core;
pub mod sensors;
pub mod history;
pub mod analysis;
pub mod alerts;
pub mod report;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use crate::core::{EventBus, IngestionEvent, Monitor, MonitorEvent, Scheduler};
pub use sensors::{Reading, ReadingSource, TankSimulator, WaterQuality};
pub use history::HistoryBuffer;
pub use analysis::{AggregateSnapshot, Aggregator};
pub use alerts::{Alert, AlertEngine, AlertOrigin, TankStatus};
pub use report::{ReportExporter, ReportSnapshot};
pub use error::MonitorError;

/// TankWatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// TankWatch name
pub const NAME: &str = "TankWatch";
