//! Reusable control libraries

pub mod motor_driver;
pub mod rc_channel;
