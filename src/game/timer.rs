//! Strike recovery timer
//!
//! After a strike the module stays locked for a fixed delay. The host advances
//! the timer from its update loop; nothing here blocks or sleeps.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeTimer {
    delay: Duration,
    elapsed: Option<Duration>,
}

impl StrikeTimer {
    /// Create an unarmed timer
    pub fn new(delay: Duration) -> Self {
        StrikeTimer {
            delay,
            elapsed: None,
        }
    }

    /// Full lockout length
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start counting down from the full delay
    pub fn arm(&mut self) {
        self.elapsed = Some(Duration::ZERO);
    }

    /// Check if a strike delay is counting down
    pub fn is_pending(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Time left before the timer fires, if armed
    pub fn remaining(&self) -> Option<Duration> {
        self.elapsed.map(|e| self.delay.saturating_sub(e))
    }

    /// Advance by `dt`; returns true exactly once, when the delay has passed
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return false;
        };
        *elapsed = elapsed.saturating_add(dt);
        if *elapsed >= self.delay {
            self.elapsed = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_timer_never_fires() {
        let mut timer = StrikeTimer::new(Duration::from_secs(1));
        assert!(!timer.is_pending());
        assert!(!timer.advance(Duration::from_secs(5)));
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = StrikeTimer::new(Duration::from_secs(1));
        timer.arm();
        assert!(!timer.advance(Duration::from_millis(400)));
        assert_eq!(timer.remaining(), Some(Duration::from_millis(600)));
        assert!(!timer.advance(Duration::from_millis(599)));
        assert!(timer.advance(Duration::from_millis(1)));
        assert!(!timer.is_pending());
        assert!(!timer.advance(Duration::from_secs(1)));
    }

    #[test]
    fn test_zero_delay_fires_on_first_tick() {
        let mut timer = StrikeTimer::new(Duration::ZERO);
        timer.arm();
        assert!(timer.advance(Duration::ZERO));
    }

    #[test]
    fn test_huge_tick_after_partial_tick_fires() {
        let mut timer = StrikeTimer::new(Duration::from_secs(1));
        timer.arm();
        assert!(!timer.advance(Duration::from_millis(1)));
        assert!(timer.advance(Duration::MAX));
        assert!(!timer.is_pending());
    }
}
