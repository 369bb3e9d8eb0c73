// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Reading types and the reading source trait

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Water quality grade, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WaterQuality {
    Excellent,
    Good,
    Normal,
    Poor,
}

impl WaterQuality {
    /// All grades in rank order
    pub const ALL: [WaterQuality; 4] = [
        WaterQuality::Excellent,
        WaterQuality::Good,
        WaterQuality::Normal,
        WaterQuality::Poor,
    ];

    /// 0-based rank (Excellent = 0, Poor = 3)
    pub fn rank(self) -> u8 {
        match self {
            WaterQuality::Excellent => 0,
            WaterQuality::Good => 1,
            WaterQuality::Normal => 2,
            WaterQuality::Poor => 3,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Potable when the rank does not exceed `threshold_rank`
    pub fn is_potable(self, threshold_rank: u8) -> bool {
        self.rank() <= threshold_rank
    }
}

impl fmt::Display for WaterQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaterQuality::Excellent => "Excellent",
            WaterQuality::Good => "Good",
            WaterQuality::Normal => "Normal",
            WaterQuality::Poor => "Poor",
        };
        f.write_str(name)
    }
}

/// One tank sample. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,

    /// Tank level in percent
    pub level: u8,

    /// Flow rate in m³/h
    pub flow: f64,

    // Extended water quality fields
    pub ph: Option<f64>,
    pub quality: Option<WaterQuality>,
    pub potable: Option<bool>,
}

impl Reading {
    /// Basic reading (level and flow only) stamped with the current time
    pub fn new(level: u8, flow: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            flow,
            ph: None,
            quality: None,
            potable: None,
        }
    }

    /// Attach water quality data, deriving potability from `threshold_rank`
    pub fn with_quality(mut self, ph: f64, quality: WaterQuality, threshold_rank: u8) -> Self {
        self.ph = Some(ph);
        self.quality = Some(quality);
        self.potable = Some(quality.is_potable(threshold_rank));
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// True when the flow meter reports exactly zero
    pub fn is_no_flow(&self) -> bool {
        self.flow == 0.0
    }
}

/// Anything that can produce tank readings.
///
/// The simulator implements this today; a hardware adapter can replace it
/// without touching history, aggregation or alerting.
pub trait ReadingSource: Send {
    /// Source identifier used in logs
    fn id(&self) -> &str;

    /// Produce the next reading
    fn generate(&mut self) -> Result<Reading>;
}
