// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Report module - read-only snapshots for exporters

mod export;

pub use export::ReportExporter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::Alert;
use crate::analysis::{AggregateSnapshot, HistorySummary};
use crate::error::{MonitorError, MonitorResult};
use crate::sensors::Reading;

/// Export format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Everything a report needs, frozen at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub generated_at: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub readings: Vec<Reading>,
    pub aggregate: AggregateSnapshot,
    pub summary: HistorySummary,
    /// Newest first
    pub alerts: Vec<Alert>,
}

impl ReportSnapshot {
    /// Fails with `NoData` when there are no readings to report on
    pub fn build(
        readings: Vec<Reading>,
        aggregate: AggregateSnapshot,
        alerts: Vec<Alert>,
    ) -> MonitorResult<Self> {
        let (period_start, period_end) = match (readings.first(), readings.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            _ => return Err(MonitorError::NoData),
        };

        let summary = HistorySummary::summarize(&readings);

        Ok(Self {
            generated_at: Utc::now(),
            period_start,
            period_end,
            readings,
            aggregate,
            summary,
            alerts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_empty_history_is_rejected() {
        let result = ReportSnapshot::build(Vec::new(), AggregateSnapshot::default(), Vec::new());
        assert!(matches!(result, Err(MonitorError::NoData)));
    }

    #[test]
    fn test_period_spans_window() {
        let start = Utc::now() - Duration::minutes(10);
        let end = Utc::now();
        let readings = vec![
            Reading::new(40, 1.0).at(start),
            Reading::new(50, 2.0).at(end),
        ];

        let report = ReportSnapshot::build(readings, AggregateSnapshot::default(), Vec::new()).unwrap();

        assert_eq!(report.period_start, start);
        assert_eq!(report.period_end, end);
        assert_eq!(report.summary.count, 2);
        assert!((report.summary.mean_level - 45.0).abs() < 1e-9);
    }
}
