// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Monitoring session - ties source, history, aggregates and alerts together

use tokio::sync::broadcast;
use tracing::{debug, info};

use super::event_bus::{EventBus, IngestionEvent, MonitorEvent};
use crate::alerts::{Alert, AlertEngine, AlertRules, TankStatus};
use crate::analysis::{AggregateSnapshot, Aggregator, HistorySummary};
use crate::config::{MonitorConfig, SimulatorConfig};
use crate::error::{MonitorError, MonitorResult};
use crate::history::HistoryBuffer;
use crate::report::ReportSnapshot;
use crate::sensors::{Reading, ReadingSource, TankSimulator};

/// One monitoring session.
///
/// All state is owned here, so independent sessions can coexist. Every
/// method runs to completion; callers sharing a monitor across tasks must
/// hold a single lock for the whole call.
pub struct Monitor {
    config: MonitorConfig,
    source: Box<dyn ReadingSource>,
    history: HistoryBuffer,
    aggregator: Aggregator,
    alerts: AlertEngine,
    events: EventBus,
}

impl Monitor {
    pub fn new(config: MonitorConfig, source: Box<dyn ReadingSource>) -> MonitorResult<Self> {
        config.validate()?;

        info!(
            "Monitor created: source={}, capacity={}, interval={}s",
            source.id(),
            config.history_capacity,
            config.tick_interval_secs
        );

        Ok(Self {
            history: HistoryBuffer::new(config.history_capacity),
            aggregator: Aggregator::from_config(&config),
            alerts: AlertEngine::new(AlertRules::from_config(&config)),
            events: EventBus::new(config.event_channel_capacity),
            source,
            config,
        })
    }

    /// Monitor fed by the random tank simulator
    pub fn simulated(config: MonitorConfig, simulator: &SimulatorConfig) -> MonitorResult<Self> {
        simulator.validate()?;
        let source = TankSimulator::new("tank-sim", simulator, config.potable_quality_threshold_rank)
            .map_err(|e| MonitorError::config(e.to_string()))?;
        Self::new(config, Box::new(source))
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one ingestion cycle with a fresh reading from the source
    pub fn tick(&mut self) -> MonitorResult<IngestionEvent> {
        let reading = self.source.generate()?;
        Ok(self.ingest(reading))
    }

    /// Out-of-band tick for a manual "simulate" action
    pub fn trigger_reading_now(&mut self) -> MonitorResult<IngestionEvent> {
        debug!("Manual reading triggered");
        self.tick()
    }

    /// Push a reading through history, aggregates and alert rules
    pub fn ingest(&mut self, reading: Reading) -> IngestionEvent {
        self.history.append(reading.clone());
        self.aggregator.ingest(&reading);

        let alert = self.alerts.evaluate(&reading);
        if let Some(ref alert) = alert {
            self.alerts.record(alert.clone());
        }

        let rules = self.alerts.rules();
        let event = IngestionEvent {
            status: rules.status(&reading),
            level_band: rules.level_band(&reading),
            aggregate: self.aggregate_snapshot(),
            reading,
            alert,
        };

        debug!(
            "Tick #{}: level={}% flow={:.2} status={}",
            event.aggregate.packet_count,
            event.reading.level,
            event.reading.flow,
            event.status.label()
        );

        self.events.publish_ingestion(event.clone());
        event
    }

    pub fn on_ingestion<F>(&mut self, callback: F)
    where
        F: Fn(&IngestionEvent) + Send + Sync + 'static,
    {
        self.events.on_ingestion(callback);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    pub fn history_snapshot(&self) -> Vec<Reading> {
        self.history.snapshot()
    }

    pub fn aggregate_snapshot(&self) -> AggregateSnapshot {
        self.aggregator.snapshot(self.history.len())
    }

    /// Alerts newest first
    pub fn alert_log(&self) -> Vec<Alert> {
        self.alerts.log()
    }

    /// Status of the most recent reading still in the window
    pub fn current_status(&self) -> Option<TankStatus> {
        self.history.latest().map(|r| self.alerts.status(r))
    }

    pub fn history_summary(&self) -> HistorySummary {
        HistorySummary::summarize(self.history.iter())
    }

    /// Drop the history window. Aggregate counters are kept.
    pub fn clear_history(&mut self) {
        let dropped = self.history.len();
        self.history.clear();
        info!("History cleared ({} readings dropped)", dropped);
        self.events.publish_history_cleared();
    }

    pub fn record_manual_alert(&mut self, message: &str) -> MonitorResult<Alert> {
        let alert = self.alerts.record_manual(message)?;
        self.events.publish_manual_alert(alert.clone());
        Ok(alert)
    }

    /// Read-only snapshot for report exporters
    pub fn report(&self) -> MonitorResult<ReportSnapshot> {
        ReportSnapshot::build(
            self.history_snapshot(),
            self.aggregate_snapshot(),
            self.alert_log(),
        )
    }
}
