use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

/// Fixed-period ticker. The first tick completes immediately; a tick that overruns
/// pushes the schedule back instead of firing a burst to catch up.
pub struct Cadence {
    interval: Interval,
}

impl Cadence {
    /// `period` must be non-zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}
