//! Rate limiting for statement execution.
//!
//! A [`Pacer`] holds a target rate in statements per second and tells the
//! caller how long to wait before the next batch may be released. It tracks
//! the schedule from a fixed start, so short stalls are caught up rather than
//! accumulated.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Pacer {
    target_rate: Option<f64>,
    started: Instant,
}

impl Pacer {
    /// Pace at `rate` statements per second. A non-positive or non-finite
    /// rate disables pacing.
    pub fn new(rate: f64) -> Self {
        let target_rate = (rate.is_finite() && rate > 0.0).then_some(rate);
        Self {
            target_rate,
            started: Instant::now(),
        }
    }

    pub fn unlimited() -> Self {
        Self {
            target_rate: None,
            started: Instant::now(),
        }
    }

    pub fn target_rate(&self) -> Option<f64> {
        self.target_rate
    }

    /// Offset from the start at which `released` statements are allowed to
    /// have gone out.
    pub fn earliest_release(&self, released: u64) -> Duration {
        match self.target_rate {
            Some(rate) => Duration::from_secs_f64(released as f64 / rate),
            None => Duration::ZERO,
        }
    }

    /// How long to wait, given `released` statements so far and `elapsed`
    /// time since the start.
    pub fn delay_for(&self, released: u64, elapsed: Duration) -> Duration {
        self.earliest_release(released).saturating_sub(elapsed)
    }

    /// Sleep until `released` statements are within the target rate.
    pub async fn pace(&self, released: u64) {
        let delay = self.delay_for(released, self.started.elapsed());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_rates() {
        assert_eq!(Pacer::new(0.0).target_rate(), None);
        assert_eq!(Pacer::new(-5.0).target_rate(), None);
        assert_eq!(Pacer::new(f64::INFINITY).target_rate(), None);
        assert_eq!(Pacer::unlimited().earliest_release(1_000_000), Duration::ZERO);
    }

    #[test]
    fn test_release_schedule() {
        let pacer = Pacer::new(100.0);
        assert_eq!(pacer.earliest_release(0), Duration::ZERO);
        assert_eq!(pacer.earliest_release(50), Duration::from_millis(500));
        assert_eq!(pacer.earliest_release(200), Duration::from_secs(2));
    }

    #[test]
    fn test_delay_catches_up() {
        let pacer = Pacer::new(10.0);
        assert_eq!(
            pacer.delay_for(10, Duration::from_millis(400)),
            Duration::from_millis(600)
        );
        // Behind schedule: no wait.
        assert_eq!(pacer.delay_for(10, Duration::from_secs(3)), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_pace_waits() {
        let pacer = Pacer::new(200.0);
        let start = Instant::now();
        pacer.pace(10).await;
        assert!(start.elapsed() >= Duration::from_millis(45));
    }

    #[tokio::test]
    async fn test_unlimited_does_not_wait() {
        let pacer = Pacer::unlimited();
        let start = Instant::now();
        pacer.pace(1_000_000).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
