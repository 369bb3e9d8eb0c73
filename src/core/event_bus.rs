// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Event bus for monitor observers

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::alerts::{Alert, LevelBand, TankStatus};
use crate::analysis::AggregateSnapshot;
use crate::sensors::Reading;

/// Emitted once per tick, after the reading has been fully processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionEvent {
    pub reading: Reading,
    pub aggregate: AggregateSnapshot,
    pub status: TankStatus,
    pub level_band: LevelBand,
    pub alert: Option<Alert>,
}

/// Everything the monitor announces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MonitorEvent {
    Ingestion(IngestionEvent),
    ManualAlert(Alert),
    HistoryCleared,
}

type IngestionObserver = Box<dyn Fn(&IngestionEvent) + Send + Sync + 'static>;

/// Fan-out to synchronous callbacks and broadcast subscribers
pub struct EventBus {
    event_tx: broadcast::Sender<MonitorEvent>,
    observers: Vec<IngestionObserver>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);

        Self {
            event_tx,
            observers: Vec::new(),
        }
    }

    /// Register a callback run inline after every tick
    pub fn on_ingestion<F>(&mut self, callback: F)
    where
        F: Fn(&IngestionEvent) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(callback));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.event_tx.subscribe()
    }

    pub fn publish_ingestion(&self, event: IngestionEvent) {
        for observer in &self.observers {
            observer(&event);
        }
        self.publish(MonitorEvent::Ingestion(event));
    }

    pub fn publish_manual_alert(&self, alert: Alert) {
        self.publish(MonitorEvent::ManualAlert(alert));
    }

    pub fn publish_history_cleared(&self) {
        self.publish(MonitorEvent::HistoryCleared);
    }

    fn publish(&self, event: MonitorEvent) {
        // No receivers is not an error
        if self.event_tx.send(event).is_err() {
            trace!("No event subscribers");
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
