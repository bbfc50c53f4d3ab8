//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod storage;
pub mod timer;
pub mod watchdog;

// Re-export trait interfaces
pub use adc::AdcInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use pwm::{PwmInterface, ServoInterface};
pub use storage::StorageInterface;
pub use timer::TimerInterface;
pub use watchdog::WatchdogInterface;
