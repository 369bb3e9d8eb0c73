// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Summary statistics over the history window

use serde::{Deserialize, Serialize};

use crate::sensors::Reading;

/// Statistical summary of a set of readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub count: usize,
    pub mean_level: f64,
    pub mean_flow: f64,
    pub min_level: u8,
    pub max_level: u8,
    pub no_flow_count: usize,
    /// Share of potable readings among those carrying quality data
    pub potable_ratio: Option<f64>,
}

impl HistorySummary {
    pub fn summarize<'a>(readings: impl IntoIterator<Item = &'a Reading>) -> Self {
        let mut count = 0usize;
        let mut level_sum = 0.0;
        let mut flow_sum = 0.0;
        let mut min_level = u8::MAX;
        let mut max_level = u8::MIN;
        let mut no_flow_count = 0usize;
        let mut graded = 0usize;
        let mut potable = 0usize;

        for r in readings {
            count += 1;
            level_sum += r.level as f64;
            flow_sum += r.flow;
            min_level = min_level.min(r.level);
            max_level = max_level.max(r.level);
            if r.is_no_flow() {
                no_flow_count += 1;
            }
            if let Some(p) = r.potable {
                graded += 1;
                if p {
                    potable += 1;
                }
            }
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            count,
            mean_level: level_sum / count as f64,
            mean_flow: flow_sum / count as f64,
            min_level,
            max_level,
            no_flow_count,
            potable_ratio: (graded > 0).then(|| potable as f64 / graded as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::WaterQuality;

    #[test]
    fn test_empty() {
        let readings: Vec<Reading> = Vec::new();
        let summary = HistorySummary::summarize(&readings);
        assert_eq!(summary, HistorySummary::default());
    }

    #[test]
    fn test_means_and_extremes() {
        let readings = vec![
            Reading::new(20, 1.0),
            Reading::new(90, 0.0),
            Reading::new(60, 2.0),
        ];
        let summary = HistorySummary::summarize(&readings);

        assert_eq!(summary.count, 3);
        assert!((summary.mean_level - 170.0 / 3.0).abs() < 1e-9);
        assert!((summary.mean_flow - 1.0).abs() < 1e-9);
        assert_eq!(summary.min_level, 20);
        assert_eq!(summary.max_level, 90);
        assert_eq!(summary.no_flow_count, 1);
        assert_eq!(summary.potable_ratio, None);
    }

    #[test]
    fn test_potable_ratio() {
        let readings = vec![
            Reading::new(50, 1.0).with_quality(7.0, WaterQuality::Good, 2),
            Reading::new(50, 1.0).with_quality(7.0, WaterQuality::Poor, 2),
            Reading::new(50, 1.0).with_quality(7.0, WaterQuality::Excellent, 2),
            Reading::new(50, 1.0).with_quality(7.0, WaterQuality::Poor, 2),
        ];
        let summary = HistorySummary::summarize(&readings);
        assert_eq!(summary.potable_ratio, Some(0.5));
    }
}
