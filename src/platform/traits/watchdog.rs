//! Hardware watchdog interface trait
//!
//! The watchdog is the last line of defense against a hung control loop: it
//! is serviced once per main-loop iteration, and a missed timeout forces a
//! hardware reset independent of any software state machine.

/// Watchdog interface trait
///
/// # Safety Invariants
///
/// - Once started, `feed()` must be called within the configured timeout
/// - There is no software path to disarm a running watchdog
pub trait WatchdogInterface {
    /// Arm the watchdog with the given timeout.
    fn start(&mut self, timeout_ms: u32);

    /// Service the watchdog, restarting its countdown.
    fn feed(&mut self);
}
