//! Mock ADC implementation for testing

use crate::platform::{traits::AdcInterface, Result};

/// Mock ADC with a settable raw reading
#[derive(Debug)]
pub struct MockAdc {
    raw: u16,
    reads: u32,
}

impl MockAdc {
    /// Create a new mock ADC reading 0 counts
    pub fn new() -> Self {
        Self { raw: 0, reads: 0 }
    }

    /// Set the raw count returned by subsequent reads
    pub fn set_raw(&mut self, raw: u16) {
        self.raw = raw;
    }

    /// Number of conversions performed so far
    pub fn read_count(&self) -> u32 {
        self.reads
    }
}

impl Default for MockAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcInterface for MockAdc {
    fn read(&mut self) -> Result<u16> {
        self.reads += 1;
        Ok(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_adc_returns_set_value() {
        let mut adc = MockAdc::new();
        assert_eq!(adc.read().unwrap(), 0);

        adc.set_raw(512);
        assert_eq!(adc.read().unwrap(), 512);
        assert_eq!(adc.read_count(), 2);
    }
}
