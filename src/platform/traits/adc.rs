//! ADC interface trait
//!
//! Battery voltage monitoring reads through this trait; the conversion to
//! volts (reference voltage, divider ratio) happens in the battery monitor,
//! not here.

use crate::platform::Result;

/// ADC interface trait
///
/// # Safety Invariants
///
/// - ADC peripheral must be initialized before use
/// - Readings are raw counts, 0 to full scale
pub trait AdcInterface {
    /// Perform one conversion and return the raw counts.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc(AdcError::ConversionFailed)` if the
    /// conversion does not complete.
    fn read(&mut self) -> Result<u16>;
}
