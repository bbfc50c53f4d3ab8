//! External device collaborator traits
//!
//! Register-level drivers live outside this crate. The control core only
//! consumes the narrow surfaces defined here.

pub mod accel;
pub mod heading_led;

pub use accel::Accelerometer;
pub use heading_led::HeadingIndicator;

#[cfg(any(test, feature = "mock"))]
pub use accel::MockAccel;
#[cfg(any(test, feature = "mock"))]
pub use heading_led::MockHeadingIndicator;
