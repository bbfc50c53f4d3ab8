#![cfg_attr(not(test), no_std)]

//! meltybrain - drive and telemetry control core for a melty-brain combat robot
//!
//! The robot spins continuously and translates by powering its motors only
//! during part of each rotation, synchronized to heading. This library
//! provides the RC input decoder, the multi-mode motor firing engine, the
//! safety supervisor and the telemetry aggregator, all behind a platform
//! abstraction so the whole control core runs (and is tested) on the host.

// Platform abstraction layer (hardware access stays behind traits)
pub mod platform;

// External collaborator devices (accelerometer, heading indicator)
pub mod devices;

// Reusable control libraries (RC decoding, motor firing)
pub mod libraries;

// Core systems (safety supervisor, telemetry aggregator, logging)
pub mod core;

// Persistent calibration storage
pub mod parameters;

// Vehicle logic: spin control and the main control loop
pub mod robot;

// Compile-time configuration constants
pub mod config;
