// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Scripted reading source

use std::collections::VecDeque;

use anyhow::{bail, Result};

use super::{Reading, ReadingSource};

/// Replays a fixed list of readings in order, then fails.
///
/// Readings are emitted as scripted, timestamps included.
pub struct ReplaySource {
    id: String,
    queue: VecDeque<Reading>,
}

impl ReplaySource {
    pub fn new(id: &str, readings: impl IntoIterator<Item = Reading>) -> Self {
        Self {
            id: id.to_string(),
            queue: readings.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ReadingSource for ReplaySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn generate(&mut self) -> Result<Reading> {
        match self.queue.pop_front() {
            Some(reading) => Ok(reading),
            None => bail!("replay source '{}' exhausted", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_replays_in_order_then_fails() {
        let mut source = ReplaySource::new("script", vec![Reading::new(20, 1.0), Reading::new(90, 0.0)]);

        assert_eq!(source.generate().unwrap().level, 20);
        assert_eq!(source.generate().unwrap().level, 90);
        assert_eq!(source.remaining(), 0);
        assert!(source.generate().is_err());
    }

    #[test]
    fn test_keeps_scripted_timestamps() {
        let stamped = Utc::now() - Duration::hours(3);
        let mut source = ReplaySource::new("script", vec![Reading::new(70, 1.5).at(stamped)]);

        assert_eq!(source.generate().unwrap().timestamp, stamped);
    }
}
