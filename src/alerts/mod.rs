// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Alert module - rule evaluation and the alert log

mod rules;

pub use rules::{AlertRules, LevelBand, TankStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{MonitorError, MonitorResult};
use crate::sensors::Reading;

/// Where an alert came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertOrigin {
    Automatic,
    Manual,
}

/// Recorded alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub origin: AlertOrigin,
    pub message: String,
    pub fired_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(origin: AlertOrigin, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            message: message.into(),
            fired_at: Utc::now(),
        }
    }
}

/// Evaluates readings against the rules and keeps the alert log.
///
/// The log grows without bound for the lifetime of the session.
pub struct AlertEngine {
    rules: AlertRules,
    log: Vec<Alert>,
}

impl AlertEngine {
    pub fn new(rules: AlertRules) -> Self {
        Self {
            rules,
            log: Vec::new(),
        }
    }

    pub fn rules(&self) -> &AlertRules {
        &self.rules
    }

    /// Pure rule check; the caller decides whether to record the result
    pub fn evaluate(&self, reading: &Reading) -> Option<Alert> {
        self.rules
            .check(reading)
            .map(|message| Alert::new(AlertOrigin::Automatic, message))
    }

    pub fn status(&self, reading: &Reading) -> TankStatus {
        self.rules.status(reading)
    }

    pub fn record(&mut self, alert: Alert) {
        match alert.origin {
            AlertOrigin::Automatic => warn!("Automatic alert: {}", alert.message),
            AlertOrigin::Manual => info!("Manual alert recorded: {}", alert.message),
        }
        self.log.push(alert);
    }

    /// Record operator-entered text. Blank text is rejected and the log is left as is.
    pub fn record_manual(&mut self, message: &str) -> MonitorResult<Alert> {
        let message = message.trim();
        if message.is_empty() {
            return Err(MonitorError::invalid("manual alert message is empty"));
        }

        let alert = Alert::new(AlertOrigin::Manual, message);
        self.record(alert.clone());
        Ok(alert)
    }

    /// Alerts newest first
    pub fn log(&self) -> Vec<Alert> {
        self.log.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn count_by_origin(&self, origin: AlertOrigin) -> usize {
        self.log.iter().filter(|a| a.origin == origin).count()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(AlertRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_does_not_record() {
        let engine = AlertEngine::default();
        let alert = engine.evaluate(&Reading::new(10, 0.0)).unwrap();
        assert_eq!(alert.origin, AlertOrigin::Automatic);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_manual_rejects_blank() {
        let mut engine = AlertEngine::default();

        assert!(matches!(engine.record_manual(""), Err(MonitorError::InvalidInput(_))));
        assert!(matches!(engine.record_manual("   "), Err(MonitorError::InvalidInput(_))));
        assert_eq!(engine.len(), 0);
    }

    #[test]
    fn test_manual_appends_one() {
        let mut engine = AlertEngine::default();
        let alert = engine.record_manual("Tank inspected").unwrap();

        assert_eq!(alert.origin, AlertOrigin::Manual);
        assert_eq!(alert.message, "Tank inspected");
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.log()[0], alert);
    }

    #[test]
    fn test_manual_message_is_trimmed() {
        let mut engine = AlertEngine::default();
        let alert = engine.record_manual("  valve replaced \n").unwrap();
        assert_eq!(alert.message, "valve replaced");
    }

    #[test]
    fn test_log_is_newest_first() {
        let mut engine = AlertEngine::default();
        engine.record_manual("first").unwrap();
        engine.record_manual("second").unwrap();
        if let Some(alert) = engine.evaluate(&Reading::new(5, 1.0)) {
            engine.record(alert);
        }

        let log = engine.log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].origin, AlertOrigin::Automatic);
        assert_eq!(log[1].message, "second");
        assert_eq!(log[2].message, "first");
        assert_eq!(engine.count_by_origin(AlertOrigin::Manual), 2);
    }
}
