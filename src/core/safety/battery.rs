//! Battery voltage monitor
//!
//! Converts raw battery-sense ADC counts to pack voltage and tracks a
//! rolling count of below-threshold reads. A single sag (motor inrush,
//! ADC noise) never trips the alarm; only a sustained run of low reads does.

use crate::config;
use crate::platform::AdcInterface;

/// Battery monitor over the battery-sense ADC channel
#[derive(Debug)]
pub struct BatteryMonitor {
    voltage: f32,
    low_reads: u32,
}

impl BatteryMonitor {
    /// Create a monitor with no reading taken yet
    pub const fn new() -> Self {
        Self {
            voltage: 0.0,
            low_reads: 0,
        }
    }

    /// Sample the ADC and update the rolling low-voltage count
    ///
    /// `voltage = raw / full_scale * reference * divider`. A failed
    /// conversion is a transient glitch: the previous voltage is kept and
    /// the low count is untouched.
    pub fn sample<A: AdcInterface>(&mut self, adc: &mut A) -> f32 {
        if let Ok(raw) = adc.read() {
            let v = raw as f32 / config::ADC_FULL_SCALE as f32
                * config::ADC_REFERENCE_VOLTAGE
                * config::VOLTAGE_DIVIDER;
            self.voltage = v;
            if v < config::BATTERY_WARN_VOLTAGE {
                self.low_reads = self.low_reads.saturating_add(1);
            } else {
                self.low_reads = 0;
            }
        }
        self.voltage
    }

    /// Most recent pack voltage, 0.0 before the first sample
    pub fn voltage(&self) -> f32 {
        self.voltage
    }

    /// Below the warning threshold right now
    pub fn is_low(&self) -> bool {
        self.low_reads > 0
    }

    /// Sustained low voltage: enough consecutive low reads to alarm
    pub fn is_critical(&self) -> bool {
        config::BATTERY_ALERT_ENABLED
            && self.low_reads > config::LOW_BAT_REPEAT_READS_BEFORE_ALARM
    }
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new()
    }
}
