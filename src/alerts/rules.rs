// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Threshold rules and derived tank status

use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::sensors::Reading;

/// Levels below this are shown in the warning band
const LOW_LEVEL_BAND: u8 = 50;

/// Overall tank condition, same priority order as the alert rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankStatus {
    Critical,
    NoFlow,
    Normal,
}

impl TankStatus {
    pub fn label(self) -> &'static str {
        match self {
            TankStatus::Critical => "critical",
            TankStatus::NoFlow => "no-flow",
            TankStatus::Normal => "normal",
        }
    }
}

/// Gauge band for the tank level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelBand {
    Critical,
    Low,
    Normal,
}

/// Fixed alert thresholds. Holds no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertRules {
    pub level_critical: u8,
    pub no_flow_mid_level: u8,
}

impl Default for AlertRules {
    fn default() -> Self {
        Self {
            level_critical: 25,
            no_flow_mid_level: 40,
        }
    }
}

impl AlertRules {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            level_critical: config.level_critical_threshold,
            no_flow_mid_level: config.no_flow_mid_level_threshold,
        }
    }

    /// First matching rule wins; `None` when the reading is unremarkable
    pub fn check(&self, reading: &Reading) -> Option<String> {
        if reading.level < self.level_critical {
            return Some(format!(
                "low tank level (below {}%); risk of supply shortage",
                self.level_critical
            ));
        }

        if reading.is_no_flow() && reading.level > self.no_flow_mid_level {
            return Some(
                "no flow with mid/high tank level; possible pump failure or closed valve".to_string(),
            );
        }

        None
    }

    pub fn status(&self, reading: &Reading) -> TankStatus {
        if reading.level < self.level_critical {
            TankStatus::Critical
        } else if reading.is_no_flow() {
            TankStatus::NoFlow
        } else {
            TankStatus::Normal
        }
    }

    pub fn level_band(&self, reading: &Reading) -> LevelBand {
        match reading.level {
            l if l < self.level_critical => LevelBand::Critical,
            l if l < LOW_LEVEL_BAND => LevelBand::Low,
            _ => LevelBand::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_level_takes_priority() {
        let rules = AlertRules::default();
        let message = rules.check(&Reading::new(10, 0.0)).unwrap();
        assert!(message.starts_with("low tank level"));
        assert!(!message.contains("no flow"));
    }

    #[test]
    fn test_no_flow_at_high_level() {
        let rules = AlertRules::default();
        let message = rules.check(&Reading::new(80, 0.0)).unwrap();
        assert!(message.starts_with("no flow with mid/high tank level"));
    }

    #[test]
    fn test_normal_reading_is_quiet() {
        let rules = AlertRules::default();
        assert_eq!(rules.check(&Reading::new(80, 1.5)), None);
    }

    #[test]
    fn test_no_flow_at_mid_level_boundary() {
        let rules = AlertRules::default();
        // Not strictly above 40, and not below 25
        assert_eq!(rules.check(&Reading::new(40, 0.0)), None);
        assert_eq!(rules.check(&Reading::new(30, 0.0)), None);
        assert!(rules.check(&Reading::new(41, 0.0)).is_some());
    }

    #[test]
    fn test_critical_boundary() {
        let rules = AlertRules::default();
        assert!(rules.check(&Reading::new(24, 1.0)).is_some());
        assert_eq!(rules.check(&Reading::new(25, 1.0)), None);
    }

    #[test]
    fn test_status_priority() {
        let rules = AlertRules::default();
        assert_eq!(rules.status(&Reading::new(10, 0.0)), TankStatus::Critical);
        assert_eq!(rules.status(&Reading::new(30, 0.0)), TankStatus::NoFlow);
        assert_eq!(rules.status(&Reading::new(80, 1.5)), TankStatus::Normal);
        assert_eq!(TankStatus::NoFlow.label(), "no-flow");
    }

    #[test]
    fn test_level_band() {
        let rules = AlertRules::default();
        assert_eq!(rules.level_band(&Reading::new(24, 1.0)), LevelBand::Critical);
        assert_eq!(rules.level_band(&Reading::new(49, 1.0)), LevelBand::Low);
        assert_eq!(rules.level_band(&Reading::new(50, 1.0)), LevelBand::Normal);
    }
}
