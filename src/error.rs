// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Error types for the monitoring core

use thiserror::Error;

/// Errors surfaced by the monitoring core
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A command was called with unusable input; state is unchanged
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected at construction time
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A report was requested while the history window is empty
    #[error("no data to export")]
    NoData,

    /// The reading source failed to produce a reading
    #[error("reading source failed: {0}")]
    Source(#[from] anyhow::Error),
}

impl MonitorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result alias for core operations
pub type MonitorResult<T> = std::result::Result<T, MonitorError>;
