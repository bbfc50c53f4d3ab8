//! Calibration record persistence
//!
//! A few calibration scalars survive power cycles in byte-addressed storage.
//! A sentinel byte guards the record: any mismatch (fresh part, layout
//! change via a sentinel bump) falls back to compiled defaults. The sentinel
//! is the validity check; there is no CRC.
//!
//! Layout (little-endian, fixed offsets):
//!
//! | offset | size | field              |
//! |--------|------|--------------------|
//! | 0      | 1    | sentinel           |
//! | 1      | 1    | led_offset_percent |
//! | 2      | 4    | mount_radius_cm    |
//! | 6      | 4    | zero_g_offset      |

use crate::config;
use crate::platform::{Result, StorageInterface};
use crate::log_warn;

/// Storage offset of the calibration record
const RECORD_OFFSET: usize = 0;
/// Serialized record size in bytes
const RECORD_LEN: usize = 10;

/// Calibration values tuned per robot
///
/// Loaded once at boot; mutated only through the config-mode workflow, never
/// by the hot path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRecord {
    /// Accelerometer distance from the center of rotation (cm)
    pub mount_radius_cm: f32,
    /// Heading-LED offset as percent of a rotation
    pub led_offset_percent: u8,
    /// Accelerometer reading at rest (G)
    pub zero_g_offset: f32,
    /// Validity marker; must match the compiled sentinel
    pub sentinel: u8,
}

impl CalibrationRecord {
    /// Compiled default calibration
    pub const fn defaults() -> Self {
        Self {
            mount_radius_cm: config::DEFAULT_ACCEL_MOUNT_RADIUS_CM,
            led_offset_percent: config::DEFAULT_LED_OFFSET_PERCENT,
            zero_g_offset: config::DEFAULT_ACCEL_ZERO_G_OFFSET,
            sentinel: config::CALIBRATION_SENTINEL,
        }
    }

    fn to_bytes(self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0] = self.sentinel;
        buf[1] = self.led_offset_percent;
        buf[2..6].copy_from_slice(&self.mount_radius_cm.to_le_bytes());
        buf[6..10].copy_from_slice(&self.zero_g_offset.to_le_bytes());
        buf
    }

    fn from_bytes(buf: &[u8; RECORD_LEN]) -> Self {
        Self {
            sentinel: buf[0],
            led_offset_percent: buf[1],
            mount_radius_cm: f32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]),
            zero_g_offset: f32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]),
        }
    }
}

impl Default for CalibrationRecord {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Typed load/save of the calibration record
pub struct CalibrationStore;

impl CalibrationStore {
    /// Load the calibration record, falling back to compiled defaults
    ///
    /// A read failure or sentinel mismatch is not an error: the robot runs on
    /// defaults and the fallback is logged at WARNING.
    pub fn load<S: StorageInterface>(storage: &mut S) -> CalibrationRecord {
        let mut buf = [0u8; RECORD_LEN];
        if storage.read(RECORD_OFFSET, &mut buf).is_err() {
            log_warn!("calibration read failed, using defaults");
            return CalibrationRecord::defaults();
        }
        let record = CalibrationRecord::from_bytes(&buf);
        if record.sentinel != config::CALIBRATION_SENTINEL {
            log_warn!(
                "calibration sentinel mismatch ({} != {}), using defaults",
                record.sentinel,
                config::CALIBRATION_SENTINEL
            );
            return CalibrationRecord::defaults();
        }
        record
    }

    /// Persist the record with the compiled sentinel
    pub fn save<S: StorageInterface>(
        storage: &mut S,
        record: &CalibrationRecord,
    ) -> Result<()> {
        let mut stamped = *record;
        stamped.sentinel = config::CALIBRATION_SENTINEL;
        storage.write(RECORD_OFFSET, &stamped.to_bytes())
    }
}
