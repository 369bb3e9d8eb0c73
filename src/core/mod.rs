//! Core module - monitoring session, observers and scheduling

mod monitor;
mod scheduler;
mod event_bus;

pub use monitor::Monitor;
pub use scheduler::{FixedTicks, IntervalTicks, PeriodicTask, Scheduler, SharedMonitor, TickSource};
pub use event_bus::{EventBus, IngestionEvent, MonitorEvent};
