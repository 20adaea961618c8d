//! Wall-clock budget for one top-level search.
//!
//! The clock is polled at every recursive entry point. Polls are cheap (an
//! atomic load); the actual time check only runs every `check_interval`
//! nodes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

/// The search ran out of time or was stopped. Internal to the search:
/// the driver turns it into "best move found so far".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search cancelled")]
pub struct Cancelled;

#[derive(Debug, Clone)]
pub struct SearchClock {
    stopped: Arc<AtomicBool>,
    start: Instant,
    budget: Option<Duration>,
    /// When false the budget is ignored; an explicit stop still cancels.
    armed: bool,
    check_interval: u64,
}

/// Lets another thread end a running search early.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl SearchClock {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start: Instant::now(),
            budget,
            armed: true,
            check_interval: 64,
        }
    }

    /// Restart the clock with a new budget and clear any pending stop.
    pub fn start(&mut self, budget: Option<Duration>) {
        self.start = Instant::now();
        self.budget = budget;
        self.armed = true;
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Suspend the deadline. Used for the depth-1 iteration, which must
    /// always complete.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stopped))
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Fails once the search has to unwind. `nodes` is the running node
    /// count; the clock is read only every `check_interval` nodes.
    #[inline]
    pub fn poll(&self, nodes: u64) -> Result<(), Cancelled> {
        if self.is_stopped() {
            return Err(Cancelled);
        }
        if nodes % self.check_interval == 0 && self.expired() {
            self.stop();
            return Err(Cancelled);
        }
        Ok(())
    }

    /// True while another iteration may be started.
    pub fn has_time(&self) -> bool {
        !self.is_stopped() && !self.expired()
    }

    fn expired(&self) -> bool {
        match self.budget {
            Some(limit) if self.armed => self.start.elapsed() >= limit,
            _ => false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Remaining budget, `None` when unlimited.
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.budget?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for SearchClock {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
