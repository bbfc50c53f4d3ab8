//! Mock PWM and servo output implementations for testing

use crate::platform::{
    error::{PlatformError, ServoError},
    traits::{PwmInterface, ServoInterface},
    Result,
};

/// Mock duty-cycle PWM implementation
///
/// Tracks the commanded duty cycle for test verification.
#[derive(Debug)]
pub struct MockPwm {
    duty: u8,
}

impl MockPwm {
    /// Create a new mock PWM channel at 0% duty
    pub fn new() -> Self {
        Self { duty: 0 }
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmInterface for MockPwm {
    fn set_duty(&mut self, duty: u8) -> Result<()> {
        self.duty = duty;
        Ok(())
    }

    fn duty(&self) -> u8 {
        self.duty
    }
}

/// Mock RC servo output
///
/// Records every commanded pulse width so tests can assert whole traces.
/// History is bounded; once full, further pulses update the current value
/// but are not recorded.
#[derive(Debug)]
pub struct MockServo {
    pulse_us: u16,
    /// Every pulse ever commanded, in order
    pub history: heapless::Vec<u16, 64>,
}

impl MockServo {
    /// Create a new mock servo output at neutral
    pub fn new() -> Self {
        Self {
            pulse_us: 1500,
            history: heapless::Vec::new(),
        }
    }
}

impl Default for MockServo {
    fn default() -> Self {
        Self::new()
    }
}

impl ServoInterface for MockServo {
    fn write_microseconds(&mut self, pulse_us: u16) -> Result<()> {
        if !(1000..=2000).contains(&pulse_us) {
            return Err(PlatformError::Servo(ServoError::InvalidPulseWidth));
        }
        self.pulse_us = pulse_us;
        let _ = self.history.push(pulse_us);
        Ok(())
    }

    fn pulse_width_us(&self) -> u16 {
        self.pulse_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pwm_duty() {
        let mut pwm = MockPwm::new();
        assert_eq!(pwm.duty(), 0);

        pwm.set_duty(230).unwrap();
        assert_eq!(pwm.duty(), 230);
    }

    #[test]
    fn test_mock_servo_records_history() {
        let mut servo = MockServo::new();
        assert_eq!(servo.pulse_width_us(), 1500);

        servo.write_microseconds(2000).unwrap();
        servo.write_microseconds(1500).unwrap();

        assert_eq!(servo.pulse_width_us(), 1500);
        assert_eq!(servo.history.as_slice(), &[2000, 1500]);
    }

    #[test]
    fn test_mock_servo_rejects_out_of_envelope_pulse() {
        let mut servo = MockServo::new();
        assert_eq!(
            servo.write_microseconds(2500),
            Err(PlatformError::Servo(ServoError::InvalidPulseWidth))
        );
        // Last good value retained
        assert_eq!(servo.pulse_width_us(), 1500);
    }
}
