//! Core subsystems: safety supervision, telemetry, logging

pub mod logging;
pub mod safety;
pub mod telemetry;
