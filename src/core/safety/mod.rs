//! Safety supervision
//!
//! The supervisor decides, once per cycle, whether the firing engine may
//! energize motors. It owns the boot-time throttle check, the signal-loss
//! and battery failsafes, the operator hard stop, and the watchdog
//! heartbeat. A failsafe transition preempts any per-motor call made
//! earlier in the same cycle: the main loop forces motors off whenever
//! `motors_allowed()` is false.

pub mod battery;

pub use battery::BatteryMonitor;

use crate::config;
use crate::core::telemetry::{LogLevel, TelemetryAggregator};
use crate::platform::WatchdogInterface;

/// Supervisor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyState {
    /// Waiting for proof the transmitter throttle is at zero
    BootCheck,
    /// Normal operation, motors may energize
    Running,
    /// Motors forced off; recoverable unless hard-stopped
    Failsafe,
}

/// Safety supervisor state machine
#[derive(Debug)]
pub struct SafetySupervisor {
    state: SafetyState,
    /// Operator e-stop: failsafe becomes permanent
    hard_stopped: bool,
    /// Start of the current zero-throttle window during boot check
    quiet_since_ms: Option<u32>,
}

impl SafetySupervisor {
    /// Create a supervisor in its initial state
    ///
    /// With the boot-time throttle check disabled the robot arms
    /// immediately.
    pub const fn new() -> Self {
        Self {
            state: if config::VERIFY_RC_THROTTLE_ZERO_AT_BOOT {
                SafetyState::BootCheck
            } else {
                SafetyState::Running
            },
            hard_stopped: false,
            quiet_since_ms: None,
        }
    }

    /// Current state
    pub fn state(&self) -> SafetyState {
        self.state
    }

    /// Whether the firing engine may energize motors this cycle
    pub fn motors_allowed(&self) -> bool {
        self.state == SafetyState::Running
    }

    /// Operator e-stop: enter failsafe and never leave it
    pub fn hard_stop(&mut self) {
        self.hard_stopped = true;
        self.state = SafetyState::Failsafe;
    }

    /// Service the hardware watchdog
    ///
    /// Called once per main-loop iteration. The watchdog reset on a missed
    /// deadline is the hardware's last line of defense, independent of this
    /// state machine.
    pub fn service_watchdog<W: WatchdogInterface>(&self, watchdog: &mut W) {
        watchdog.feed();
    }

    /// Evaluate safety preconditions and advance the state machine
    pub fn evaluate(
        &mut self,
        now_ms: u32,
        rc_healthy: bool,
        throttle_percent: u8,
        battery_critical: bool,
        telemetry: &mut TelemetryAggregator,
    ) -> SafetyState {
        match self.state {
            SafetyState::BootCheck => {
                if !rc_healthy {
                    self.quiet_since_ms = None;
                } else if throttle_percent > 0 {
                    // Transmitter left with throttle up; refuse to arm and
                    // keep telling the operator (the aggregator rate-limits)
                    self.quiet_since_ms = None;
                    telemetry.log_fmt(
                        LogLevel::Warning,
                        "safety",
                        format_args!("throttle {}% at boot, not arming", throttle_percent),
                        now_ms,
                    );
                } else {
                    let since = *self.quiet_since_ms.get_or_insert(now_ms);
                    if now_ms.wrapping_sub(since) >= config::MAX_MS_BETWEEN_RC_UPDATES {
                        telemetry.log(LogLevel::Info, "safety", "armed", now_ms);
                        self.state = SafetyState::Running;
                    }
                }
            }
            SafetyState::Running => {
                if !rc_healthy {
                    telemetry.log(LogLevel::Error, "safety", "RC signal lost, failsafe", now_ms);
                    self.state = SafetyState::Failsafe;
                } else if battery_critical {
                    telemetry.log(LogLevel::Error, "safety", "battery low, failsafe", now_ms);
                    self.state = SafetyState::Failsafe;
                }
            }
            SafetyState::Failsafe => {
                if !self.hard_stopped && rc_healthy && !battery_critical {
                    telemetry.log(LogLevel::Info, "safety", "failsafe cleared", now_ms);
                    self.state = SafetyState::Running;
                }
            }
        }
        self.state
    }
}

impl Default for SafetySupervisor {
    fn default() -> Self {
        Self::new()
    }
}
