//! Analysis module - consumption aggregation and window statistics

mod aggregator;
mod statistics;

pub use aggregator::{AggregateSnapshot, Aggregator};
pub use statistics::HistorySummary;
