//! Wall-clock source, swappable in tests

use chrono::Utc;

/// Provides the current unix time in seconds
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

/// Real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1_700_000_000).now_unix(), 1_700_000_000);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14 as a lower bound
        assert!(SystemClock.now_unix() > 1_700_000_000);
    }
}
