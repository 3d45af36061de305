//! Bounded polling with exponential backoff
//!
//! A run is checked at most `max_attempts` times. The first check happens
//! immediately; each later check waits `initial_interval * multiplier^(n-1)`,
//! capped at `max_interval`.

use std::time::Duration;

/// Polling policy for waiting on a remote run
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Maximum number of status checks
    pub max_attempts: u32,

    /// Delay before the second check
    pub initial_interval: Duration,

    /// Upper bound on any single delay
    pub max_interval: Duration,

    /// Growth factor between consecutive delays
    pub backoff_multiplier: f64,
}

impl Default for PollPolicy {
    /// About ten minutes of waiting in total
    fn default() -> Self {
        Self {
            max_attempts: 120,
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(5),
            backoff_multiplier: 1.5,
        }
    }
}

impl PollPolicy {
    /// Create a new poll policy
    pub fn new(
        max_attempts: u32,
        initial_interval: Duration,
        max_interval: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_interval,
            max_interval,
            backoff_multiplier,
        }
    }

    /// Millisecond-scale policy for tests
    pub fn fast() -> Self {
        Self {
            max_attempts: 10,
            initial_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        }
    }

    /// Set the maximum number of status checks
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay to wait before check number `attempt` (0-based)
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_interval.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        // Cap at max interval
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_interval)
    }

    /// Sum of all delays if every attempt is used
    pub fn max_total_wait(&self) -> Duration {
        (0..self.max_attempts).map(|a| self.delay_before(a)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.max_attempts, 120);
        assert_eq!(policy.initial_interval, Duration::from_millis(500));
        assert_eq!(policy.max_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_first_check_is_immediate() {
        assert_eq!(PollPolicy::default().delay_before(0), Duration::ZERO);
    }

    #[test]
    fn test_backoff_calculation() {
        let policy = PollPolicy::new(
            10,
            Duration::from_millis(100),
            Duration::from_secs(10),
            2.0,
        );

        assert_eq!(policy.delay_before(1), Duration::from_millis(100));
        assert_eq!(policy.delay_before(2), Duration::from_millis(200));
        assert_eq!(policy.delay_before(3), Duration::from_millis(400));
        assert_eq!(policy.delay_before(4), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let policy = PollPolicy::default();
        assert_eq!(policy.delay_before(50), Duration::from_secs(5));
    }

    #[test]
    fn test_default_total_wait_is_bounded() {
        let total = PollPolicy::default().max_total_wait();
        assert!(total > Duration::from_secs(500));
        assert!(total < Duration::from_secs(600));
    }
}
