//! Progress ticker
//!
//! Decides when the controller should publish position updates. Runs only
//! while a presentation layer is attached and output is playing; timing is
//! left to the host loop, which asks `next_tick_in` how long it may sleep.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProgressTicker {
    interval: Duration,
    attached: bool,
    armed: bool,
}

impl ProgressTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            attached: false,
            armed: false,
        }
    }

    /// Playback started
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Playback paused, stopped, or torn down
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a tick should currently fire
    pub fn is_running(&self) -> bool {
        self.attached && self.armed
    }

    /// Delay until the next tick, `None` while not running
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.is_running().then_some(self.interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
