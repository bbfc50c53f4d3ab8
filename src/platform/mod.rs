//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the control core. All
//! platform-specific code lives behind these traits; the rest of the crate
//! never touches a register or a pin directly.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    AdcInterface, GpioInterface, PwmInterface, ServoInterface, StorageInterface, TimerInterface,
    WatchdogInterface,
};
