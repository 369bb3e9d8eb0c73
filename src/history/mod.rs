// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Bounded window of recent readings

use std::collections::VecDeque;

use crate::sensors::Reading;

/// Fixed-capacity FIFO of readings, oldest first
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Storage grows with use; `capacity` is only the eviction bound
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::new(),
            capacity,
        }
    }

    /// Add to the tail, dropping the oldest reading when full
    pub fn append(&mut self, reading: Reading) {
        if self.readings.len() >= self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }

    /// Copy of the window in arrival order
    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn oldest(&self) -> Option<&Reading> {
        self.readings.front()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(buffer: &HistoryBuffer) -> Vec<u8> {
        buffer.snapshot().iter().map(|r| r.level).collect()
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = HistoryBuffer::new(12);
        for i in 0..40u8 {
            buffer.append(Reading::new(10 + i, 1.0));
            assert!(buffer.len() <= 12);
        }
    }

    #[test]
    fn test_keeps_last_readings_in_order() {
        let mut buffer = HistoryBuffer::new(12);
        // capacity + 5 ingestions
        for i in 0..17u8 {
            buffer.append(Reading::new(10 + i, 1.0));
        }

        let expected: Vec<u8> = (15..27).collect();
        assert_eq!(levels(&buffer), expected);
        assert_eq!(buffer.oldest().map(|r| r.level), Some(15));
        assert_eq!(buffer.latest().map(|r| r.level), Some(26));
    }

    #[test]
    fn test_exactly_full_keeps_everything() {
        let mut buffer = HistoryBuffer::new(12);
        for i in 0..12u8 {
            buffer.append(Reading::new(10 + i, 1.0));
        }

        assert_eq!(buffer.len(), 12);
        assert_eq!(levels(&buffer), (10..22).collect::<Vec<u8>>());
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut buffer = HistoryBuffer::new(usize::MAX / 2);
        buffer.append(Reading::new(50, 1.0));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), usize::MAX / 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buffer = HistoryBuffer::new(3);
        buffer.append(Reading::new(50, 1.0));
        buffer.append(Reading::new(60, 1.0));

        buffer.clear();
        assert!(buffer.is_empty());
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 3);

        buffer.append(Reading::new(70, 1.0));
        assert_eq!(levels(&buffer), vec![70]);
    }
}
