use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Re-armable fixed-interval tick source. At most one interval is armed at a
/// time; arming again replaces the previous one, which is how speed changes
/// and restarts take effect. Missed ticks are delayed, never batched.
pub struct SessionClock {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            interval: None,
            period: None,
        }
    }

    pub fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period = Some(period);
    }

    /// Re-arms at the new period; a no-op when the period is unchanged so
    /// the running cadence is not reset on every growth check.
    pub fn reschedule(&mut self, period: Duration) {
        if self.period != Some(period) {
            self.start(period);
        }
    }

    pub fn stop(&mut self) {
        self.interval = None;
        self.period = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Waits for the next tick; pends forever while the clock is stopped.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_stop_toggle_running() {
        let mut clock = SessionClock::new();
        assert!(!clock.is_running());

        clock.start(Duration::from_millis(5));
        assert!(clock.is_running());
        clock.tick().await;

        clock.stop();
        assert!(!clock.is_running());
    }

    #[tokio::test]
    async fn test_reschedule_changes_cadence() {
        let mut clock = SessionClock::new();
        clock.start(Duration::from_secs(60));
        clock.reschedule(Duration::from_millis(1));

        // Would time out if the 60s interval were still armed.
        tokio::time::timeout(Duration::from_secs(5), clock.tick())
            .await
            .expect("rescheduled clock should tick quickly");
    }
}
