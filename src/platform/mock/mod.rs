//! Mock platform implementations for host-side testing
//!
//! Every hardware trait has a state-recording mock here. Timing is fully
//! simulated: tests advance [`MockTimer`] explicitly, so timeout behavior is
//! deterministic.

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod storage;
pub mod timer;
pub mod watchdog;

pub use adc::MockAdc;
pub use gpio::MockGpio;
pub use pwm::{MockPwm, MockServo};
pub use storage::MockStorage;
pub use timer::MockTimer;
pub use watchdog::MockWatchdog;
