use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use crate::tween::TICK_UNITS;

/// Pacing primitive behind every animation: one `wait` call is one tick.
///
/// The engine never reads a wall clock of its own; it counts ticks. Injecting
/// a [`ManualTicker`] therefore makes playback fully deterministic under test,
/// while [`IntervalTicker`] paces against real time for live hosts.
pub trait Ticker {
    /// Block until the next tick boundary.
    fn wait(&mut self);
}

/// Real-time ticker with a fixed nominal period.
///
/// Runs on `Instant` arithmetic: each tick is scheduled one interval after the
/// previous one, and when a caller falls behind the schedule restarts from the
/// current time instead of queuing missed ticks.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    next: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_UNITS))
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) {
        let due = self
            .next
            .unwrap_or_else(|| Instant::now() + self.interval);

        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }

        let after = Instant::now();
        let mut next = due + self.interval;
        if next < after {
            next = after + self.interval;
        }
        self.next = Some(next);
    }
}

/// Shared tick counter handed out by [`ManualTicker::counter`].
#[derive(Clone, Debug, Default)]
pub struct TickCount(Arc<AtomicU64>);

impl TickCount {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deterministic ticker for tests: never sleeps, only counts.
#[derive(Debug, Default)]
pub struct ManualTicker {
    count: TickCount,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reading how many ticks have elapsed, valid after the ticker
    /// itself has been moved into a stage.
    pub fn counter(&self) -> TickCount {
        self.count.clone()
    }
}

impl Ticker for ManualTicker {
    fn wait(&mut self) {
        self.count.0.fetch_add(1, Ordering::Relaxed);
    }
}
