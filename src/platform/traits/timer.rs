//! Timer interface trait
//!
//! This module defines the monotonic time source that platform
//! implementations must provide. All timeouts in the control core are
//! measured against these uptime counters, never wall-clock time.

/// Timer interface trait
///
/// # Safety Invariants
///
/// - Monotonic time source (never goes backwards)
/// - Microsecond-level precision required
pub trait TimerInterface {
    /// Current uptime in microseconds.
    ///
    /// The 32-bit value wraps after roughly 71 minutes; the RC decoder
    /// tolerates the wrap by dropping the sample that spans it.
    fn now_us(&self) -> u32;

    /// Current uptime in milliseconds.
    ///
    /// Wraps after ~49 days. Must count independently of [`now_us`] (like
    /// millis()/micros()), never be derived from the already-wrapped 32-bit
    /// microsecond value: every millisecond timeout in the control core
    /// relies on this counter staying continuous across the ~71 minute
    /// microsecond wrap.
    ///
    /// [`now_us`]: TimerInterface::now_us
    fn now_ms(&self) -> u32;
}
