//! Batched endpoint-update scheduler.
//!
//! DESIGN
//! ======
//! Pointer moves arrive far faster than lines need redrawing. Geometry
//! changes only record the affected pin as dirty; once per period the
//! scheduler expands every dirty pin to the connections touching it (both
//! directions), dedupes them, and hands the board a batch in which each
//! connection appears exactly once. Both dirty sets are cleared as the batch
//! is taken, so k requests for overlapping pins inside one period collapse to
//! one recompute per connection.
//!
//! LIFECYCLE
//! =========
//! The scheduler starts with its board and stops on teardown. A stopped
//! scheduler drops requests and yields no batches, so nothing recomputes
//! against entities that are being destroyed. A batch is marked in flight
//! until the board finishes it; a tick that lands while one is in flight is
//! skipped rather than reentered.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, trace};

use crate::graph::ConnectionGraph;
use crate::ids::{ConnectionId, PinId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct UpdateScheduler {
    period: Duration,
    state: SchedulerState,
    dirty_pins: HashSet<PinId>,
    dirty_connections: HashSet<ConnectionId>,
    in_flight: bool,
}

impl UpdateScheduler {
    /// A stopped scheduler with the given tick period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: SchedulerState::Stopped,
            dirty_pins: HashSet::new(),
            dirty_connections: HashSet::new(),
            in_flight: false,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn start(&mut self) {
        if self.state == SchedulerState::Running {
            return;
        }
        self.state = SchedulerState::Running;
        info!(period = ?self.period, "update scheduler started");
    }

    /// Stop ticking and discard pending work.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        self.state = SchedulerState::Stopped;
        self.dirty_pins.clear();
        self.dirty_connections.clear();
        self.in_flight = false;
        info!("update scheduler stopped");
    }

    /// Record that `pin`'s connections need new endpoints. No recompute happens here.
    pub fn request_update(&mut self, pin: PinId) {
        if self.is_running() {
            self.dirty_pins.insert(pin);
        }
    }

    /// Drop a pin that no longer exists from the pending set.
    pub fn forget_pin(&mut self, pin: PinId) {
        self.dirty_pins.remove(&pin);
    }

    #[must_use]
    pub fn pending_pins(&self) -> usize {
        self.dirty_pins.len()
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Take the next batch: every connection touching a dirty pin, once each.
    ///
    /// Returns `None` when stopped, when nothing is dirty, or while a previous
    /// batch is still in flight. A returned batch must be closed with
    /// [`UpdateScheduler::finish_batch`].
    pub fn begin_batch(&mut self, graph: &ConnectionGraph) -> Option<Vec<ConnectionId>> {
        if !self.is_running() || self.in_flight || self.dirty_pins.is_empty() {
            return None;
        }
        self.in_flight = true;

        for pin in &self.dirty_pins {
            self.dirty_connections.extend(graph.connections_for_pin(*pin));
        }
        let batch: Vec<ConnectionId> = self.dirty_connections.drain().collect();
        trace!(pins = self.dirty_pins.len(), connections = batch.len(), "endpoint batch collected");
        self.dirty_pins.clear();
        Some(batch)
    }

    pub fn finish_batch(&mut self) {
        self.in_flight = false;
    }
}

/// Periodic tick source for driving [`UpdateScheduler`] from an async loop.
///
/// Missed ticks are skipped, never bunched, so a slow consumer sees at most
/// one tick at a time.
#[must_use]
pub fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}
