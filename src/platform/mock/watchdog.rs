//! Mock watchdog implementation for testing

use crate::platform::traits::WatchdogInterface;

/// Mock watchdog recording arm and feed activity
#[derive(Debug, Default)]
pub struct MockWatchdog {
    timeout_ms: Option<u32>,
    feeds: u32,
}

impl MockWatchdog {
    /// Create a new unarmed mock watchdog
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout the watchdog was armed with, if started
    pub fn timeout_ms(&self) -> Option<u32> {
        self.timeout_ms
    }

    /// Number of times the watchdog has been serviced
    pub fn feed_count(&self) -> u32 {
        self.feeds
    }
}

impl WatchdogInterface for MockWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        self.timeout_ms = Some(timeout_ms);
    }

    fn feed(&mut self) {
        self.feeds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_watchdog_records_start_and_feeds() {
        let mut wdt = MockWatchdog::new();
        assert_eq!(wdt.timeout_ms(), None);

        wdt.start(5000);
        wdt.feed();
        wdt.feed();

        assert_eq!(wdt.timeout_ms(), Some(5000));
        assert_eq!(wdt.feed_count(), 2);
    }
}
