// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Periodic tick scheduling

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use super::Monitor;
use crate::error::MonitorResult;

/// Monitor shared between the scheduler and command handlers
pub type SharedMonitor = Arc<Mutex<Monitor>>;

/// Decides when the next tick happens
#[async_trait]
pub trait TickSource: Send {
    /// Wait for the next tick. `false` means no more ticks.
    async fn next_tick(&mut self) -> bool;
}

/// Wall-clock ticks. The first tick fires immediately.
pub struct IntervalTicks {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> bool {
        let period = self.period;
        // Built lazily so it is created inside the runtime
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        interval.tick().await;
        true
    }
}

/// A fixed number of back-to-back ticks
pub struct FixedTicks {
    remaining: usize,
}

impl FixedTicks {
    pub fn new(count: usize) -> Self {
        Self { remaining: count }
    }
}

#[async_trait]
impl TickSource for FixedTicks {
    async fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        tokio::task::yield_now().await;
        true
    }
}

/// Drives `Monitor::tick` from a tick source
pub struct Scheduler {
    monitor: SharedMonitor,
}

impl Scheduler {
    pub fn new(monitor: SharedMonitor) -> Self {
        Self { monitor }
    }

    pub fn monitor(&self) -> SharedMonitor {
        self.monitor.clone()
    }

    /// Tick until the source runs dry or shutdown fires. Returns ticks completed.
    ///
    /// A failing reading source stops the loop and is returned as is.
    pub async fn run<T: TickSource>(
        &self,
        mut ticks: T,
        mut shutdown: broadcast::Receiver<()>,
    ) -> MonitorResult<u64> {
        info!("Scheduler started");
        let mut completed = 0u64;

        loop {
            tokio::select! {
                more = ticks.next_tick() => {
                    if !more {
                        debug!("Tick source exhausted");
                        break;
                    }

                    // One lock spans the whole generate/ingest/evaluate/notify cycle
                    let result = self.monitor.lock().tick();
                    if let Err(e) = result {
                        error!("Tick failed after {} ticks: {}", completed, e);
                        return Err(e);
                    }
                    completed += 1;
                }
                _ = shutdown.recv() => {
                    info!("Scheduler shutting down...");
                    break;
                }
            }
        }

        info!("Scheduler stopped after {} ticks", completed);
        Ok(completed)
    }

    /// Run on a background task
    pub fn spawn<T: TickSource + 'static>(&self, ticks: T) -> PeriodicTask {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let scheduler = Scheduler::new(self.monitor.clone());
        let handle = tokio::spawn(async move { scheduler.run(ticks, shutdown_rx).await });

        PeriodicTask {
            shutdown: shutdown_tx,
            handle,
        }
    }
}

/// Handle to a spawned scheduler. Dropping it also stops the task.
pub struct PeriodicTask {
    shutdown: broadcast::Sender<()>,
    handle: JoinHandle<MonitorResult<u64>>,
}

impl PeriodicTask {
    /// Stop after the tick in progress, if any, completes
    pub fn cancel(&self) {
        let _ = self.shutdown.send(());
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task and return the number of ticks it completed
    pub async fn join(self) -> Result<u64> {
        let completed = self.handle.await??;
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MonitorConfig, SimulatorConfig};
    use crate::error::MonitorError;
    use crate::sensors::{Reading, ReplaySource};

    /// Never produces a tick
    struct StalledTicks;

    #[async_trait]
    impl TickSource for StalledTicks {
        async fn next_tick(&mut self) -> bool {
            std::future::pending::<()>().await;
            false
        }
    }

    fn shared_simulated() -> SharedMonitor {
        let sim = SimulatorConfig {
            seed: Some(21),
            ..SimulatorConfig::default()
        };
        Arc::new(Mutex::new(
            Monitor::simulated(MonitorConfig::default(), &sim).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_fixed_ticks_drive_monitor() {
        let monitor = shared_simulated();
        let scheduler = Scheduler::new(monitor.clone());
        let (_tx, rx) = broadcast::channel(1);

        let completed = scheduler.run(FixedTicks::new(15), rx).await.unwrap();

        assert_eq!(completed, 15);
        let snap = monitor.lock().aggregate_snapshot();
        assert_eq!(snap.packet_count, 15);
        assert_eq!(snap.history_length, 12);
    }

    #[tokio::test]
    async fn test_source_failure_stops_loop() {
        let source = ReplaySource::new("script", vec![Reading::new(50, 1.0), Reading::new(60, 1.0)]);
        let monitor = Arc::new(Mutex::new(
            Monitor::new(MonitorConfig::default(), Box::new(source)).unwrap(),
        ));
        let scheduler = Scheduler::new(monitor.clone());
        let (_tx, rx) = broadcast::channel(1);

        let result = scheduler.run(FixedTicks::new(5), rx).await;

        assert!(matches!(result, Err(MonitorError::Source(_))));
        assert_eq!(monitor.lock().aggregate_snapshot().packet_count, 2);
    }

    #[tokio::test]
    async fn test_cancel_stalled_task() {
        let scheduler = Scheduler::new(shared_simulated());
        let task = scheduler.spawn(StalledTicks);

        task.cancel();
        assert_eq!(task.join().await.unwrap(), 0);
        assert_eq!(scheduler.monitor().lock().aggregate_snapshot().packet_count, 0);
    }

    #[tokio::test]
    async fn test_interval_ticks_fire_immediately() {
        let scheduler = Scheduler::new(shared_simulated());
        let task = scheduler.spawn(IntervalTicks::new(Duration::from_secs(3600)));

        // The first interval tick completes without waiting a full period
        tokio::time::sleep(Duration::from_millis(200)).await;
        task.cancel();

        assert_eq!(task.join().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_spawned_fixed_ticks_finish_on_their_own() {
        let scheduler = Scheduler::new(shared_simulated());
        let task = scheduler.spawn(FixedTicks::new(3));

        assert_eq!(task.join().await.unwrap(), 3);
        assert_eq!(scheduler.monitor().lock().aggregate_snapshot().packet_count, 3);
    }
}
