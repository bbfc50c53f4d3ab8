//! Spin-rate estimation and rotation-phase tracking
//!
//! RPM comes from the centripetal acceleration seen by an accelerometer
//! mounted off-center: `g = RPM_ACCEL_CONSTANT * radius_cm * rpm^2`. From
//! the RPM a rotation period follows, and the tracker keeps a phase within
//! the current rotation. Steering stretches or shrinks the tracked period,
//! which walks the perceived heading around the real rotation.
//!
//! The firing-window layout below (which motor is powered in which phase
//! arc, LED arc width) is a tuning policy, not a contract: drive feel is
//! calibrated empirically per robot.

use libm::sqrtf;

use crate::config;
use crate::libraries::rc_channel::{RcInputs, StickDirection};
use crate::parameters::CalibrationRecord;

/// Fraction of each rotation the heading LED is lit
const LED_ARC: f32 = 0.25;

/// One cycle's view of the rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    /// Estimated spin rate
    pub rpm: u32,
    /// G magnitude after the zero-G offset
    pub g_used: f32,
    /// Position within the current rotation, [0, 1)
    pub phase: f32,
    /// Fast enough to translate, and the stick commands it
    pub translating: bool,
    /// Powered-phase flags for this instant
    pub motor1_powered: bool,
    pub motor2_powered: bool,
    /// Heading LED lit this instant
    pub led_on: bool,
}

impl SpinState {
    /// Spun down, both motors treated as continuously powered
    const fn spun_down(g_used: f32, rpm: u32) -> Self {
        Self {
            rpm,
            g_used,
            phase: 0.0,
            translating: false,
            motor1_powered: true,
            motor2_powered: true,
            led_on: true,
        }
    }
}

/// Rotation-phase tracker
#[derive(Debug)]
pub struct SpinTracker {
    /// Microseconds into the current rotation
    phase_us: u32,
    last_update_us: Option<u32>,
}

impl SpinTracker {
    pub const fn new() -> Self {
        Self {
            phase_us: 0,
            last_update_us: None,
        }
    }

    /// Estimate RPM from the offset-corrected G reading
    pub fn rpm_from_g(g_used: f32, radius_cm: f32) -> u32 {
        // Below the noise floor the estimate is meaningless
        if g_used <= 0.1 {
            return 0;
        }
        sqrtf(g_used / (config::RPM_ACCEL_CONSTANT * radius_cm)) as u32
    }

    /// Advance the tracked rotation and derive this cycle's firing windows
    pub fn update(
        &mut self,
        now_us: u32,
        g_force: f32,
        calibration: &CalibrationRecord,
        inputs: &RcInputs,
    ) -> SpinState {
        let g_used = (g_force - calibration.zero_g_offset).max(0.0);
        let rpm = Self::rpm_from_g(g_used, calibration.mount_radius_cm);

        if rpm < config::MIN_TRANSLATION_RPM {
            // Spin-up: full continuous power, no heading tracking
            self.phase_us = 0;
            self.last_update_us = Some(now_us);
            return SpinState::spun_down(g_used, rpm);
        }

        let period_us = 60_000_000 / rpm;

        // Steering: a deflected stick stretches or shrinks the tracked
        // period, rotating the perceived heading
        let mut effective_period = period_us as f32;
        if !inputs.leftright_in_normal_deadzone() {
            effective_period +=
                inputs.leftright_offset_us() as f32 / config::LEFT_RIGHT_HEADING_CONTROL_DIVISOR;
        }
        let effective_period = (effective_period as u32).max(1);

        let elapsed = now_us.wrapping_sub(self.last_update_us.unwrap_or(now_us));
        self.last_update_us = Some(now_us);
        self.phase_us = (self.phase_us.wrapping_add(elapsed)) % effective_period;
        let phase = self.phase_us as f32 / effective_period as f32;

        let direction = inputs.forback_direction();
        let translating = direction != StickDirection::Neutral;

        // While translating, each motor is powered for its arc of the
        // rotation; reverse swaps the arcs. Without translation both motors
        // run continuously.
        let (motor1_powered, motor2_powered) = if translating {
            let first_half = phase < config::TRANSLATE_ON_PORTION;
            match direction {
                StickDirection::Forward => (first_half, !first_half),
                StickDirection::Backward => (!first_half, first_half),
                StickDirection::Neutral => (true, true),
            }
        } else {
            (true, true)
        };

        let led_phase =
            (phase + calibration.led_offset_percent as f32 / 100.0) % 1.0;
        let led_on = led_phase < LED_ARC;

        SpinState {
            rpm,
            g_used,
            phase,
            translating,
            motor1_powered,
            motor2_powered,
            led_on,
        }
    }
}

impl Default for SpinTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// G reading that yields the given RPM at the given radius
    fn g_for_rpm(rpm: f32, radius_cm: f32) -> f32 {
        config::RPM_ACCEL_CONSTANT * radius_cm * rpm * rpm
    }

    fn inputs_neutral() -> RcInputs {
        RcInputs {
            throttle_us: 1700,
            leftright_us: 1500,
            forback_us: 1500,
            healthy: true,
        }
    }

    #[test]
    fn test_rpm_estimate_round_trips() {
        let rpm = SpinTracker::rpm_from_g(g_for_rpm(800.0, 10.0), 10.0);
        assert!((799..=800).contains(&rpm), "rpm {}", rpm);
    }

    #[test]
    fn test_noise_floor_reads_zero_rpm() {
        assert_eq!(SpinTracker::rpm_from_g(0.05, 10.0), 0);
    }

    #[test]
    fn test_spin_up_below_translation_rpm() {
        let mut tracker = SpinTracker::new();
        let cal = CalibrationRecord::defaults();
        // 100 rpm at default radius, well below the translation floor
        let g = cal.zero_g_offset + g_for_rpm(100.0, cal.mount_radius_cm);

        let mut inputs = inputs_neutral();
        inputs.forback_us = 2000; // stick commanding full translation

        let state = tracker.update(0, g, &cal, &inputs);

        assert!(!state.translating);
        assert!(state.motor1_powered && state.motor2_powered);
        assert_eq!(state.phase, 0.0);
    }

    #[test]
    fn test_phase_advances_with_time() {
        let mut tracker = SpinTracker::new();
        let cal = CalibrationRecord::defaults();
        // 500 rpm -> 120 ms per rotation
        let g = cal.zero_g_offset + g_for_rpm(500.0, cal.mount_radius_cm);
        let inputs = inputs_neutral();

        let state = tracker.update(1_000_000, g, &cal, &inputs);
        assert_eq!(state.phase, 0.0);

        // Quarter rotation later
        let state = tracker.update(1_030_000, g, &cal, &inputs);
        assert!((state.phase - 0.25).abs() < 0.02, "phase {}", state.phase);

        // Wraps past a full rotation
        let state = tracker.update(1_130_000, g, &cal, &inputs);
        assert!(state.phase < 0.1, "phase {}", state.phase);
    }

    #[test]
    fn test_translation_partitions_rotation_between_motors() {
        let mut tracker = SpinTracker::new();
        let cal = CalibrationRecord::defaults();
        let g = cal.zero_g_offset + g_for_rpm(500.0, cal.mount_radius_cm);

        let mut inputs = inputs_neutral();
        inputs.forback_us = 2000;

        // First half of the rotation
        let state = tracker.update(1_000_000, g, &cal, &inputs);
        assert!(state.translating);
        assert!(state.motor1_powered);
        assert!(!state.motor2_powered);

        // Second half
        let state = tracker.update(1_070_000, g, &cal, &inputs);
        assert!(!state.motor1_powered);
        assert!(state.motor2_powered);
    }

    #[test]
    fn test_reverse_swaps_motor_arcs() {
        let mut tracker = SpinTracker::new();
        let cal = CalibrationRecord::defaults();
        let g = cal.zero_g_offset + g_for_rpm(500.0, cal.mount_radius_cm);

        let mut inputs = inputs_neutral();
        inputs.forback_us = 1000; // full backward

        let state = tracker.update(1_000_000, g, &cal, &inputs);
        assert!(state.translating);
        assert!(!state.motor1_powered);
        assert!(state.motor2_powered);
    }

    #[test]
    fn test_steering_changes_effective_period() {
        let cal = CalibrationRecord::defaults();
        // Mid-bucket so the integer estimate reads 500 regardless of rounding
        let g = cal.zero_g_offset + g_for_rpm(500.5, cal.mount_radius_cm);

        // Right deflection stretches the period: after one nominal rotation
        // the phase has not quite wrapped
        let mut tracker = SpinTracker::new();
        let mut inputs = inputs_neutral();
        inputs.leftright_us = 1800;
        tracker.update(1_000_000, g, &cal, &inputs);
        let state = tracker.update(1_120_000, g, &cal, &inputs);
        assert!(state.phase > 0.9, "phase {}", state.phase);

        // Centered stick: the same elapsed time wraps exactly
        let mut tracker = SpinTracker::new();
        let inputs = inputs_neutral();
        tracker.update(1_000_000, g, &cal, &inputs);
        let state = tracker.update(1_120_000, g, &cal, &inputs);
        assert!(state.phase < 0.05, "phase {}", state.phase);
    }

    #[test]
    fn test_led_offset_shifts_the_lit_arc() {
        let mut tracker = SpinTracker::new();
        let mut cal = CalibrationRecord::defaults();
        cal.led_offset_percent = 0;
        let g = cal.zero_g_offset + g_for_rpm(500.0, cal.mount_radius_cm);
        let inputs = inputs_neutral();

        // Phase 0 with no offset: lit
        let state = tracker.update(1_000_000, g, &cal, &inputs);
        assert!(state.led_on);

        // Same phase with a half-rotation offset: dark
        cal.led_offset_percent = 50;
        let mut tracker = SpinTracker::new();
        let state = tracker.update(1_000_000, g, &cal, &inputs);
        assert!(!state.led_on);
    }
}
