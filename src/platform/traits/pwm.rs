//! PWM and servo output interface traits
//!
//! Two output styles exist on the motor pins: raw duty-cycle PWM (the fixed
//! and dynamic PWM throttle modes feed 490 Hz PWM into an ESC or MOSFET
//! driver) and standard RC servo pulses (50 Hz, 1000-2000 µs, for BLHeli
//! style bidirectional ESCs).

use crate::platform::Result;

/// Duty-cycle PWM interface trait
///
/// # Safety Invariants
///
/// - PWM peripheral must be initialized before use
/// - Only one owner per PWM channel
/// - No concurrent access to the same PWM channel from multiple contexts
pub trait PwmInterface {
    /// Set PWM duty cycle (0-255, 8-bit resolution)
    fn set_duty(&mut self, duty: u8) -> Result<()>;

    /// Get the most recently commanded duty cycle
    fn duty(&self) -> u8;
}

/// RC servo pulse output interface trait
///
/// # Safety Invariants
///
/// - Output must be attached before pulses are commanded
/// - 1000 µs = full reverse, 1500 µs = neutral, 2000 µs = full forward
pub trait ServoInterface {
    /// Command a pulse width in microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Servo(ServoError::InvalidPulseWidth)` if the
    /// pulse is outside the 1000-2000 µs envelope.
    fn write_microseconds(&mut self, pulse_us: u16) -> Result<()>;

    /// Get the most recently commanded pulse width (µs)
    fn pulse_width_us(&self) -> u16;
}
