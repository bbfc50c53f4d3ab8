//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

/// Mock GPIO implementation
///
/// Tracks pin level and mode for test verification.
#[derive(Debug)]
pub struct MockGpio {
    level: bool,
    mode: GpioMode,
}

impl MockGpio {
    /// Create a new mock GPIO pin in output mode, low
    pub fn new() -> Self {
        Self {
            level: false,
            mode: GpioMode::OutputPushPull,
        }
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        if self.mode != GpioMode::OutputPushPull {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        self.level = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        if self.mode != GpioMode::OutputPushPull {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        self.level = false;
        Ok(())
    }

    fn read(&self) -> bool {
        self.level
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_levels() {
        let mut pin = MockGpio::new();
        assert!(!pin.read());

        pin.set_high().unwrap();
        assert!(pin.read());

        pin.set_low().unwrap();
        assert!(!pin.read());
    }

    #[test]
    fn test_mock_gpio_rejects_write_in_input_mode() {
        let mut pin = MockGpio::new();
        pin.set_mode(GpioMode::Input).unwrap();

        assert_eq!(
            pin.set_high(),
            Err(PlatformError::Gpio(GpioError::InvalidMode))
        );
    }
}
