//! Persistent calibration parameters

pub mod storage;

pub use storage::{CalibrationRecord, CalibrationStore};
