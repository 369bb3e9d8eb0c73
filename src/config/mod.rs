// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, Level};

use crate::error::{MonitorError, MonitorResult};
use crate::report::ExportFormat;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Data directory
    pub data_dir: PathBuf,

    /// Log level used when no verbosity flag is given
    pub log_level: String,

    /// Monitoring pipeline configuration
    pub monitor: MonitorConfig,

    /// Simulated sensor configuration
    pub simulator: SimulatorConfig,

    /// Report export configuration
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "TankWatch".to_string(),
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            monitor: MonitorConfig::default(),
            simulator: SimulatorConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("tankwatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Parsed `log_level` (trace, debug, info, warn, error)
    pub fn log_level(&self) -> MonitorResult<Level> {
        self.log_level
            .trim()
            .parse::<Level>()
            .map_err(|_| MonitorError::config(format!("unknown log_level '{}'", self.log_level)))
    }

    /// Reject settings the monitor cannot start with
    pub fn validate(&self) -> MonitorResult<()> {
        self.log_level()?;
        self.monitor.validate()?;
        self.simulator.validate()
    }
}

/// Monitoring pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Wall-clock seconds between scheduled ticks
    pub tick_interval_secs: u64,

    /// Minutes of flow each reading stands for in the consumption estimate
    pub sample_period_minutes: f64,

    /// Readings kept in the history window
    pub history_capacity: usize,

    /// Monthly estimate = daily consumption × this factor
    pub consumption_scale_factor: f64,

    /// Highest quality rank still considered potable (0 = Excellent)
    pub potable_quality_threshold_rank: u8,

    /// Levels below this percentage are critical
    pub level_critical_threshold: u8,

    /// Zero flow above this level raises a pump/valve alert
    pub no_flow_mid_level_threshold: u8,

    /// Buffered events per broadcast subscriber
    pub event_channel_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 5,
            sample_period_minutes: 5.0,
            history_capacity: 12,
            consumption_scale_factor: 20.0,
            potable_quality_threshold_rank: 2,
            level_critical_threshold: 25,
            no_flow_mid_level_threshold: 40,
            event_channel_capacity: 64,
        }
    }
}

impl MonitorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn validate(&self) -> MonitorResult<()> {
        if self.tick_interval_secs == 0 {
            return Err(MonitorError::config("tick_interval_secs must be positive"));
        }
        if self.history_capacity == 0 {
            return Err(MonitorError::config("history_capacity must be positive"));
        }
        if !self.sample_period_minutes.is_finite() || self.sample_period_minutes <= 0.0 {
            return Err(MonitorError::config(format!(
                "sample_period_minutes must be positive, got {}",
                self.sample_period_minutes
            )));
        }
        if !self.consumption_scale_factor.is_finite() || self.consumption_scale_factor < 0.0 {
            return Err(MonitorError::config(format!(
                "consumption_scale_factor must be non-negative, got {}",
                self.consumption_scale_factor
            )));
        }
        if self.potable_quality_threshold_rank > 3 {
            return Err(MonitorError::config(format!(
                "potable_quality_threshold_rank must be 0..=3, got {}",
                self.potable_quality_threshold_rank
            )));
        }
        if self.event_channel_capacity == 0 {
            return Err(MonitorError::config("event_channel_capacity must be positive"));
        }
        Ok(())
    }
}

/// Simulated sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Chance that a reading reports exactly zero flow
    pub zero_flow_probability: f64,

    /// Emit pH, quality grade and potability
    pub extended: bool,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            zero_flow_probability: 0.15,
            extended: true,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> MonitorResult<()> {
        if !(0.0..=1.0).contains(&self.zero_flow_probability) {
            return Err(MonitorError::config(format!(
                "zero_flow_probability must be within [0, 1], got {}",
                self.zero_flow_probability
            )));
        }
        Ok(())
    }
}

/// Report export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            path: PathBuf::from("./data/reports"),
        }
    }
}
