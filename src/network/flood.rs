//! Adaptive outbound pacing.
//!
//! The writer consults [`FloodControl`] once per dequeued line. It never
//! drops or reorders anything; it only says how long to wait before the
//! write.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::FloodConfig;

/// Sliding-window burst detector with an adaptive inter-line delay.
#[derive(Debug)]
pub struct FloodControl {
    window: VecDeque<Instant>,
    capacity: usize,
    delay: Duration,
    min_delay: Duration,
    max_delay: Duration,
    step: Duration,
    cooldown: Duration,
    cooling_since: Option<Instant>,
}

impl FloodControl {
    pub fn new(config: &FloodConfig) -> Self {
        let capacity = config.max_lines_per_second.max(1) + 1;
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            delay: config.min_delay(),
            min_delay: config.min_delay(),
            max_delay: config.max_delay().max(config.min_delay()),
            step: config.step(),
            cooldown: config.cooldown(),
            cooling_since: None,
        }
    }

    /// Record a line dequeued at `now` and return how long to wait before
    /// writing it, if at all.
    pub fn on_dequeue(&mut self, now: Instant) -> Option<Duration> {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(now);

        if self.is_burst() {
            self.delay = (self.delay + self.step).clamp(self.min_delay, self.max_delay);
            self.cooling_since = Some(now);
        } else if self
            .cooling_since
            .is_some_and(|since| now.duration_since(since) > self.cooldown)
        {
            self.cooling_since = None;
            self.delay = self.min_delay;
        }

        self.cooling_since.map(|_| self.delay)
    }

    fn is_burst(&self) -> bool {
        if self.window.len() < self.capacity {
            return false;
        }
        match (self.window.front(), self.window.back()) {
            (Some(oldest), Some(newest)) => newest.duration_since(*oldest) < Duration::from_secs(1),
            _ => false,
        }
    }

    /// Delay applied while cooling.
    pub fn current_delay(&self) -> Duration {
        self.delay
    }

    pub fn is_cooling(&self) -> bool {
        self.cooling_since.is_some()
    }
}
