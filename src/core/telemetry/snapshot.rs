//! Consolidated telemetry snapshot
//!
//! One structured record holds the current readings and is the single source
//! of truth for every outward encoding: the dashboard JSON, the calibration
//! JSON, and the human-readable status line all serialize directly from it.

use core::fmt::Write;

use heapless::String;
use libm::sqrtf;

use crate::config;
use crate::parameters::CalibrationRecord;

/// Capacity of the dashboard telemetry JSON
pub const TELEMETRY_JSON_SIZE: usize = 512;
/// Capacity of the human-readable status line
pub const STATUS_LINE_SIZE: usize = 256;
/// Capacity of the calibration JSON
pub const CALIBRATION_JSON_SIZE: usize = 1024;

/// Current readings from every component, rebuilt at a bounded rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    /// Raw accelerometer G magnitude
    pub accel_g: f32,
    /// G magnitude after the zero-G offset, as used for RPM
    pub accel_used_g: f32,
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,
    pub rc_healthy: bool,
    pub rc_throttle_percent: u8,
    /// Steering stick offset from center (µs)
    pub rc_steering_us: i32,
    pub motor1_pulse_us: u16,
    pub motor2_pulse_us: u16,
    /// Present only when battery monitoring is enabled
    pub battery_voltage: Option<f32>,
    pub calibration: CalibrationRecord,
}

impl TelemetrySnapshot {
    /// Snapshot with everything at rest, as at power-up
    pub const fn at_rest() -> Self {
        Self {
            accel_g: 0.0,
            accel_used_g: 0.0,
            accel_x: 0.0,
            accel_y: 0.0,
            accel_z: 0.0,
            rc_healthy: false,
            rc_throttle_percent: 0,
            rc_steering_us: 0,
            motor1_pulse_us: config::NEUTRAL_PULSE_US,
            motor2_pulse_us: config::NEUTRAL_PULSE_US,
            battery_voltage: None,
            calibration: CalibrationRecord::defaults(),
        }
    }

    /// Spin rate derived from centripetal acceleration
    ///
    /// `rpm = sqrt(g / (RPM_ACCEL_CONSTANT * radius_cm))`. Readings at or
    /// below 0.1 G are noise floor and report 0.
    pub fn rpm(&self) -> u32 {
        if self.accel_used_g <= 0.1 {
            return 0;
        }
        let radius = self.calibration.mount_radius_cm;
        sqrtf(self.accel_used_g / (config::RPM_ACCEL_CONSTANT * radius)) as u32
    }

    /// Motor throttle as percent of the forward servo range
    fn motor_throttle_percent(pulse_us: u16) -> u16 {
        if pulse_us > config::NEUTRAL_PULSE_US {
            (pulse_us - config::NEUTRAL_PULSE_US) / 5
        } else {
            0
        }
    }

    /// Dashboard telemetry JSON
    ///
    /// Key names and fraction digits are part of the dashboard contract.
    pub fn telemetry_json(&self) -> String<TELEMETRY_JSON_SIZE> {
        let mut out = String::new();
        let _ = write!(
            out,
            "{{\"gForce\":{:.2},\"motor1Throttle\":{},\"motor2Throttle\":{},\
             \"accelUsed\":{:.2},\"rcThrottle\":{},\"rcSteering\":{},\
             \"accelX\":{:.3},\"accelY\":{:.3},\"accelZ\":{:.3}",
            self.accel_g,
            Self::motor_throttle_percent(self.motor1_pulse_us),
            Self::motor_throttle_percent(self.motor2_pulse_us),
            self.accel_used_g,
            self.rc_throttle_percent,
            self.rc_steering_us,
            self.accel_x,
            self.accel_y,
            self.accel_z,
        );
        if let Some(voltage) = self.battery_voltage {
            let _ = write!(out, ",\"battery\":{:.2}", voltage);
        }
        let _ = write!(
            out,
            ",\"rpm\":{},\"radius\":{:.2}}}",
            self.rpm(),
            self.calibration.mount_radius_cm,
        );
        out
    }

    /// Human-readable status line for the log view
    pub fn status_line(&self) -> String<STATUS_LINE_SIZE> {
        let mut out = String::new();
        let _ = write!(
            out,
            "rpm {} | g {:.2} (used {:.2}) | rc {} thr {}% steer {}us | motors {}/{}us",
            self.rpm(),
            self.accel_g,
            self.accel_used_g,
            if self.rc_healthy { "ok" } else { "LOST" },
            self.rc_throttle_percent,
            self.rc_steering_us,
            self.motor1_pulse_us,
            self.motor2_pulse_us,
        );
        if let Some(voltage) = self.battery_voltage {
            let _ = write!(out, " | batt {:.2}V", voltage);
        }
        out
    }

    /// Calibration settings JSON, keyed by setting id
    pub fn calibration_json(&self) -> String<CALIBRATION_JSON_SIZE> {
        let cal = &self.calibration;
        let defaults = CalibrationRecord::defaults();
        let mut out = String::new();
        let _ = write!(
            out,
            "{{\"ledOffset\":{{\"name\":\"LED offset\",\"value\":{},\"default\":{},\
             \"unit\":\"% of rotation\",\
             \"description\":\"Heading beacon position within each rotation\"}},\
             \"accelRadius\":{{\"name\":\"Accelerometer radius\",\"value\":{:.2},\"default\":{:.2},\
             \"unit\":\"cm\",\
             \"description\":\"Accelerometer distance from the center of rotation\"}},\
             \"zeroGOffset\":{{\"name\":\"Zero-G offset\",\"value\":{:.2},\"default\":{:.2},\
             \"unit\":\"G\",\
             \"description\":\"Accelerometer reading at rest\"}},\
             \"eepromSentinel\":{{\"name\":\"Calibration sentinel\",\"value\":{},\"default\":{},\
             \"unit\":\"\",\
             \"description\":\"Stored-record validity marker\"}}}}",
            cal.led_offset_percent,
            defaults.led_offset_percent,
            cal.mount_radius_cm,
            defaults.mount_radius_cm,
            cal.zero_g_offset,
            defaults.zero_g_offset,
            cal.sentinel,
            defaults.sentinel,
        );
        out
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_noise_floor_reports_zero() {
        let mut snapshot = TelemetrySnapshot::at_rest();
        snapshot.accel_used_g = 0.05;
        assert_eq!(snapshot.rpm(), 0);
    }

    #[test]
    fn test_rpm_from_centripetal_g() {
        let mut snapshot = TelemetrySnapshot::at_rest();
        snapshot.calibration.mount_radius_cm = 10.0;
        // g = C * r * rpm^2, so 500 rpm needs 0.00001118 * 10 * 500^2 G
        snapshot.accel_used_g = config::RPM_ACCEL_CONSTANT * 10.0 * 500.0 * 500.0;

        let rpm = snapshot.rpm();
        assert!((499..=500).contains(&rpm), "rpm {}", rpm);
    }

    #[test]
    fn test_telemetry_json_keys_and_formatting() {
        let mut snapshot = TelemetrySnapshot::at_rest();
        snapshot.accel_g = 12.25;
        snapshot.accel_used_g = 10.75;
        snapshot.accel_x = 1.125;
        snapshot.accel_y = -0.5;
        snapshot.accel_z = 0.75;
        snapshot.rc_throttle_percent = 75;
        snapshot.rc_steering_us = 120;
        snapshot.motor1_pulse_us = 1700;
        snapshot.motor2_pulse_us = 1400;
        snapshot.battery_voltage = Some(7.25);

        let json = snapshot.telemetry_json();
        let json = json.as_str();

        assert!(json.starts_with("{\"gForce\":12.25,"), "json: {}", json);
        // Forward pulse maps to percent of forward range; reverse reads 0
        assert!(json.contains("\"motor1Throttle\":40,"));
        assert!(json.contains("\"motor2Throttle\":0,"));
        assert!(json.contains("\"accelUsed\":10.75"));
        assert!(json.contains("\"rcThrottle\":75"));
        assert!(json.contains("\"rcSteering\":120"));
        assert!(json.contains("\"accelX\":1.125"));
        assert!(json.contains("\"accelY\":-0.500"));
        assert!(json.contains("\"accelZ\":0.750"));
        assert!(json.contains("\"battery\":7.25"));
        assert!(json.contains("\"radius\":10.00"));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_telemetry_json_omits_battery_when_disabled() {
        let snapshot = TelemetrySnapshot::at_rest();
        let json = snapshot.telemetry_json();
        assert!(!json.as_str().contains("battery"));
        assert!(json.as_str().contains("\"rpm\":0"));
    }

    #[test]
    fn test_status_line_reports_signal_loss() {
        let mut snapshot = TelemetrySnapshot::at_rest();
        snapshot.rc_healthy = false;
        assert!(snapshot.status_line().as_str().contains("rc LOST"));

        snapshot.rc_healthy = true;
        assert!(snapshot.status_line().as_str().contains("rc ok"));
    }

    #[test]
    fn test_calibration_json_setting_ids() {
        let mut snapshot = TelemetrySnapshot::at_rest();
        snapshot.calibration.mount_radius_cm = 4.5;
        snapshot.calibration.led_offset_percent = 25;

        let json = snapshot.calibration_json();
        let json = json.as_str();

        for key in ["ledOffset", "accelRadius", "zeroGOffset", "eepromSentinel"] {
            assert!(json.contains(key), "missing {} in {}", key, json);
        }
        assert!(json.contains("\"value\":4.50"));
        assert!(json.contains("\"default\":10.00"));
        assert!(json.contains("\"value\":25"));
        assert!(json.contains("\"value\":42,\"default\":42"));
    }
}
