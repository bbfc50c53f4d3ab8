//! Config-mode entry detection
//!
//! With the robot spun down (zero throttle), holding the steering stick
//! outside the wide dead-zone for a few seconds toggles config mode. The
//! stick must return to center between toggles so one long hold cannot
//! bounce the mode. Config mode is the only workflow that mutates stored
//! calibration.

use crate::config;
use crate::libraries::rc_channel::RcInputs;

/// Mode toggle produced by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigModeEvent {
    Entered,
    Exited,
}

/// Stick-hold detector for config mode
#[derive(Debug)]
pub struct ConfigModeTracker {
    active: bool,
    /// Start of the current deflection hold
    hold_since_ms: Option<u32>,
    /// Cleared after a toggle until the stick recenters
    armed: bool,
}

impl ConfigModeTracker {
    pub const fn new() -> Self {
        Self {
            active: false,
            hold_since_ms: None,
            armed: true,
        }
    }

    /// Whether config mode is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the detector; call once per cycle while throttle is zero
    pub fn update(&mut self, now_ms: u32, inputs: &RcInputs) -> Option<ConfigModeEvent> {
        if inputs.leftright_in_config_deadzone() {
            self.hold_since_ms = None;
            self.armed = true;
            return None;
        }

        if !self.armed {
            return None;
        }

        let since = *self.hold_since_ms.get_or_insert(now_ms);
        if now_ms.wrapping_sub(since) < config::CONFIG_MODE_HOLD_MS {
            return None;
        }

        self.active = !self.active;
        self.armed = false;
        self.hold_since_ms = None;
        Some(if self.active {
            ConfigModeEvent::Entered
        } else {
            ConfigModeEvent::Exited
        })
    }

    /// Abandon any hold in progress (throttle left zero, signal lost)
    pub fn reset_hold(&mut self) {
        self.hold_since_ms = None;
    }
}

impl Default for ConfigModeTracker {
    fn default() -> Self {
        Self::new()
    }
}
