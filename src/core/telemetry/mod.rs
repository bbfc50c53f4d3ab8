//! Telemetry aggregation
//!
//! Bridges interrupt-driven sensor/RC data to the background diagnostics
//! task. The aggregator owns the debug log ring and the consolidated
//! snapshot; the dashboard task reads both through [`SharedTelemetry`], a
//! critical-section mutex wrapper, and never drives motors or RC decoding.

pub mod ring;
pub mod snapshot;

use core::cell::RefCell;
use core::fmt;
use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;

use crate::config;
use crate::parameters::CalibrationRecord;
use crate::{log_error, log_info, log_warn};

pub use ring::{DebugEntry, DebugRing, LogLevel, DEBUG_MSG_SIZE, DEBUG_RING_SIZE};
pub use snapshot::TelemetrySnapshot;

/// Capacity of the rendered log text: every ring entry at maximum length
/// plus severity glyph and newline
pub const LOGS_TEXT_SIZE: usize = 2560;

/// Telemetry aggregator
///
/// Log entries are rate-limited globally: entries arriving closer together
/// than `MIN_MS_BETWEEN_LOG_ENTRIES` are silently dropped, bounding log
/// volume under high-frequency debug callers. Accepted entries land in the
/// ring buffer and are mirrored immediately to the synchronous log macros.
///
/// The consolidated snapshot is rebuilt from staged readings at a bounded
/// cadence; readers always get the last built snapshot without waiting.
#[derive(Debug)]
pub struct TelemetryAggregator {
    ring: DebugRing,
    /// Uptime of the last accepted log entry
    last_entry_ms: Option<u32>,
    /// Readings staged by the main loop since the last rebuild
    readings: TelemetrySnapshot,
    /// Last built snapshot, served to readers
    built: TelemetrySnapshot,
    pending: bool,
    last_rebuild_ms: Option<u32>,
}

impl TelemetryAggregator {
    /// Create an aggregator with everything at rest
    pub const fn new() -> Self {
        Self {
            ring: DebugRing::new(),
            last_entry_ms: None,
            readings: TelemetrySnapshot::at_rest(),
            built: TelemetrySnapshot::at_rest(),
            pending: false,
            last_rebuild_ms: None,
        }
    }

    /// Append a log entry, subject to the global rate limit
    ///
    /// Returns true if the entry was accepted. Drops are silent by design.
    pub fn log(&mut self, level: LogLevel, module: &str, message: &str, now_ms: u32) -> bool {
        self.log_fmt(level, module, format_args!("{}", message), now_ms)
    }

    /// Append a formatted log entry, subject to the global rate limit
    pub fn log_fmt(
        &mut self,
        level: LogLevel,
        module: &str,
        args: fmt::Arguments<'_>,
        now_ms: u32,
    ) -> bool {
        if let Some(last) = self.last_entry_ms {
            if now_ms.wrapping_sub(last) < config::MIN_MS_BETWEEN_LOG_ENTRIES {
                return false;
            }
        }
        self.last_entry_ms = Some(now_ms);

        let mut text: String<DEBUG_MSG_SIZE> = String::new();
        // Overlong messages truncate at a format-segment boundary
        let _ = write!(text, "{}: {}", module, args);

        match level {
            LogLevel::Info => log_info!("{}", text.as_str()),
            LogLevel::Warning => log_warn!("{}", text.as_str()),
            LogLevel::Error => log_error!("{}", text.as_str()),
        }

        self.ring.push(DebugEntry {
            text,
            level,
            timestamp_ms: now_ms,
        });
        true
    }

    /// Stage accelerometer readings for the next rebuild
    pub fn set_accel_readings(&mut self, g: f32, used_g: f32, x: f32, y: f32, z: f32) {
        self.readings.accel_g = g;
        self.readings.accel_used_g = used_g;
        self.readings.accel_x = x;
        self.readings.accel_y = y;
        self.readings.accel_z = z;
        self.pending = true;
    }

    /// Stage RC readings for the next rebuild
    pub fn set_rc_readings(&mut self, healthy: bool, throttle_percent: u8, steering_us: i32) {
        self.readings.rc_healthy = healthy;
        self.readings.rc_throttle_percent = throttle_percent;
        self.readings.rc_steering_us = steering_us;
        self.pending = true;
    }

    /// Stage motor pulse widths for the next rebuild
    pub fn set_motor_pulses(&mut self, motor1_us: u16, motor2_us: u16) {
        self.readings.motor1_pulse_us = motor1_us;
        self.readings.motor2_pulse_us = motor2_us;
        self.pending = true;
    }

    /// Stage the battery voltage for the next rebuild
    pub fn set_battery_voltage(&mut self, voltage: Option<f32>) {
        self.readings.battery_voltage = voltage;
        self.pending = true;
    }

    /// Stage calibration values for the next rebuild
    pub fn set_calibration(&mut self, calibration: CalibrationRecord) {
        self.readings.calibration = calibration;
        self.pending = true;
    }

    /// Rebuild the served snapshot if the cadence allows
    ///
    /// Rebuilds at least every `MAX_MS_BETWEEN_SNAPSHOT_REBUILDS`, or as soon
    /// as staged data is `MIN_MS_BETWEEN_SNAPSHOT_REBUILDS` past the last
    /// rebuild. Returns true if a rebuild happened.
    pub fn maybe_rebuild(&mut self, now_ms: u32) -> bool {
        let due = match self.last_rebuild_ms {
            None => true,
            Some(last) => {
                let elapsed = now_ms.wrapping_sub(last);
                elapsed >= config::MAX_MS_BETWEEN_SNAPSHOT_REBUILDS
                    || (self.pending && elapsed >= config::MIN_MS_BETWEEN_SNAPSHOT_REBUILDS)
            }
        };
        if !due {
            return false;
        }
        self.built = self.readings;
        self.pending = false;
        self.last_rebuild_ms = Some(now_ms);
        true
    }

    /// Last built snapshot, regardless of rebuild timing
    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.built
    }

    /// Dashboard telemetry JSON from the last built snapshot
    pub fn telemetry_json(&self) -> String<{ snapshot::TELEMETRY_JSON_SIZE }> {
        self.built.telemetry_json()
    }

    /// Calibration settings JSON from the last built snapshot
    pub fn calibration_json(&self) -> String<{ snapshot::CALIBRATION_JSON_SIZE }> {
        self.built.calibration_json()
    }

    /// Log view: newest first, one entry per line, glyph-prefixed severity
    pub fn logs_text(&self) -> String<LOGS_TEXT_SIZE> {
        let mut out = String::new();
        for entry in self.ring.iter_newest_first() {
            let glyph = match entry.level {
                LogLevel::Info => "",
                LogLevel::Warning => "\u{26a0}\u{fe0f} ",
                LogLevel::Error => "\u{1f6d1} ",
            };
            let _ = write!(out, "{}{}\n", glyph, entry.text.as_str());
        }
        out
    }

    /// Number of entries currently in the ring
    pub fn log_count(&self) -> usize {
        self.ring.len()
    }

    /// Empty the log ring
    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

impl Default for TelemetryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Telemetry shared with the dashboard task
///
/// Access goes through a blocking critical-section mutex; the closure keeps
/// entry and exit paired on every path, including early returns.
pub struct SharedTelemetry {
    inner: Mutex<CriticalSectionRawMutex, RefCell<TelemetryAggregator>>,
}

impl SharedTelemetry {
    /// Create a shared aggregator with everything at rest
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(TelemetryAggregator::new())),
        }
    }

    /// Run `f` with exclusive access to the aggregator
    pub fn with<R>(&self, f: impl FnOnce(&mut TelemetryAggregator) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl Default for SharedTelemetry {
    fn default() -> Self {
        Self::new()
    }
}
