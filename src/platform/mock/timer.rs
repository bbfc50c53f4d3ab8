//! Mock timer implementation for testing
//!
//! Uses simulated time: tests advance the clock explicitly, so timeout and
//! stale-signal behavior is deterministic. Total elapsed time is tracked in
//! 64 bits and both uptime counters derive from it, so each one wraps at its
//! own width exactly like independent millis()/micros() counters.

use core::cell::Cell;

use crate::platform::traits::TimerInterface;

/// Mock timer with manually advanced simulated time
#[derive(Debug)]
pub struct MockTimer {
    elapsed_us: Cell<u64>,
}

impl MockTimer {
    /// Create a new mock timer at t=0
    pub fn new() -> Self {
        Self {
            elapsed_us: Cell::new(0),
        }
    }

    /// Create a mock timer with the given total elapsed microseconds
    pub fn starting_at_us(elapsed_us: u64) -> Self {
        Self {
            elapsed_us: Cell::new(elapsed_us),
        }
    }

    /// Advance simulated time by the given number of microseconds
    pub fn advance_us(&self, us: u64) {
        self.elapsed_us.set(self.elapsed_us.get() + us);
    }

    /// Advance simulated time by the given number of milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    /// Jump simulated time to an absolute elapsed microsecond count
    pub fn set_us(&self, elapsed_us: u64) {
        self.elapsed_us.set(elapsed_us);
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn now_us(&self) -> u32 {
        self.elapsed_us.get() as u32
    }

    fn now_ms(&self) -> u32 {
        (self.elapsed_us.get() / 1000) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_advances() {
        let timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.advance_us(500);
        assert_eq!(timer.now_us(), 500);
        assert_eq!(timer.now_ms(), 0);

        timer.advance_ms(3);
        assert_eq!(timer.now_us(), 3500);
        assert_eq!(timer.now_ms(), 3);
    }

    #[test]
    fn test_mock_timer_set_absolute() {
        let timer = MockTimer::starting_at_us(1_000_000);
        assert_eq!(timer.now_ms(), 1000);

        timer.set_us(2_500_000);
        assert_eq!(timer.now_us(), 2_500_000);
        assert_eq!(timer.now_ms(), 2500);
    }

    #[test]
    fn test_ms_clock_survives_us_counter_wrap() {
        let timer = MockTimer::starting_at_us(u64::from(u32::MAX) - 100);
        timer.advance_us(200);

        // The us counter wrapped; the ms counter keeps counting
        assert_eq!(timer.now_us(), 99);
        assert_eq!(timer.now_ms(), 4_294_967);
    }
}
