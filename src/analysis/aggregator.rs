// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Running consumption counters

use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::sensors::Reading;

/// Point-in-time view of the aggregate counters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub packet_count: u64,
    /// m³ accumulated since session start
    pub consumption_today: f64,
    /// Always `consumption_today` × scale factor
    pub consumption_month: f64,
    pub history_length: usize,
}

/// Session-wide consumption aggregator.
///
/// Counters only grow; clearing the history window leaves them untouched.
#[derive(Debug, Clone)]
pub struct Aggregator {
    packet_count: u64,
    consumption_today: f64,
    consumption_month: f64,
    hours_per_sample: f64,
    scale_factor: f64,
}

impl Aggregator {
    pub fn new(sample_period_minutes: f64, scale_factor: f64) -> Self {
        Self {
            packet_count: 0,
            consumption_today: 0.0,
            consumption_month: 0.0,
            hours_per_sample: sample_period_minutes / 60.0,
            scale_factor,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.sample_period_minutes, config.consumption_scale_factor)
    }

    pub fn ingest(&mut self, reading: &Reading) {
        self.packet_count += 1;
        self.consumption_today += reading.flow * self.hours_per_sample;
        self.consumption_month = self.consumption_today * self.scale_factor;
    }

    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    pub fn consumption_today(&self) -> f64 {
        self.consumption_today
    }

    pub fn consumption_month(&self) -> f64 {
        self.consumption_month
    }

    /// Snapshot paired with the current history length
    pub fn snapshot(&self, history_length: usize) -> AggregateSnapshot {
        AggregateSnapshot {
            packet_count: self.packet_count,
            consumption_today: self.consumption_today,
            consumption_month: self.consumption_month,
            history_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_ingestion() {
        let mut agg = Aggregator::new(5.0, 20.0);
        for i in 0..37 {
            agg.ingest(&Reading::new(50, (i % 4) as f64 * 0.5));
        }
        assert_eq!(agg.packet_count(), 37);
    }

    #[test]
    fn test_month_tracks_today_exactly() {
        let mut agg = Aggregator::new(5.0, 20.0);
        for flow in [0.0, 0.41, 2.99, 3.0, 1.37, 0.0, 0.4] {
            agg.ingest(&Reading::new(70, flow));
            assert_eq!(agg.consumption_month(), agg.consumption_today() * 20.0);
        }
    }

    #[test]
    fn test_consumption_formula() {
        let mut agg = Aggregator::new(5.0, 20.0);
        agg.ingest(&Reading::new(70, 1.2));

        let expected = 1.2 * (5.0 / 60.0);
        assert!((agg.consumption_today() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_reports_history_length() {
        let mut agg = Aggregator::new(5.0, 20.0);
        agg.ingest(&Reading::new(70, 1.0));

        let snap = agg.snapshot(1);
        assert_eq!(snap.packet_count, 1);
        assert_eq!(snap.history_length, 1);
        assert_eq!(snap.consumption_month, snap.consumption_today * 20.0);
    }
}
