//! Motor throttle and firing engine
//!
//! Maps a commanded throttle/translation state into physical actuator
//! commands under one of four drive modes:
//! - `Binary`: plain digital on/off, duty shaping left entirely to the caller
//! - `FixedPwm`: three configured duty constants, throttle ignored
//! - `DynamicPwm`: duty interpolated coast-to-on with throttle, limits inrush
//!   current during spin-up
//! - `ServoPwm`: bidirectional ESC pulse widths around 1500 µs neutral, with
//!   translation-intensity scaling of both the powered and coast phases
//!
//! The mode is chosen once at construction; every firing call dispatches on
//! the stored variant.

pub mod outputs;

pub use outputs::{GpioMotorOutputs, PwmMotorOutputs, ServoMotorOutputs};

use crate::config;
use crate::platform::Result;

/// Motor identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorId {
    Motor1,
    Motor2,
}

impl MotorId {
    fn index(self) -> usize {
        match self {
            MotorId::Motor1 => 0,
            MotorId::Motor2 => 1,
        }
    }
}

/// Motor actuation semantics, selected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Digital HIGH on, LOW for coast and off
    Binary,
    /// Fixed on/coast/off duty cycles
    FixedPwm,
    /// Duty interpolated between coast and on with throttle
    DynamicPwm,
    /// Bidirectional servo pulse widths (primary mode)
    ServoPwm,
}

/// Physical motor outputs behind the firing engine
///
/// Each drive mode uses exactly one of these channels; adapters implement
/// the one their hardware supports and leave the rest as the no-op default.
pub trait MotorOutputs {
    /// Digital level output (Binary mode)
    fn set_level(&mut self, motor: MotorId, high: bool) -> Result<()> {
        let _ = (motor, high);
        Ok(())
    }

    /// Duty-cycle output, 0-255 (FixedPwm / DynamicPwm modes)
    fn set_duty(&mut self, motor: MotorId, duty: u8) -> Result<()> {
        let _ = (motor, duty);
        Ok(())
    }

    /// Servo pulse-width output in µs (ServoPwm mode)
    fn set_pulse_us(&mut self, motor: MotorId, pulse_us: u16) -> Result<()> {
        let _ = (motor, pulse_us);
        Ok(())
    }
}

/// Throttle / motor firing engine
///
/// Owns the per-motor pulse-width mirror (neutral 1500 µs); everything else
/// reads it through [`pulse_width_us`].
///
/// Callers are responsible for clamping `throttle_percent` to [0, 1]; the
/// linear formulas keep pulse widths inside the 1000-2000 µs envelope under
/// correct inputs.
///
/// [`pulse_width_us`]: FiringEngine::pulse_width_us
#[derive(Debug)]
pub struct FiringEngine<O: MotorOutputs> {
    outputs: O,
    mode: DriveMode,
    /// Steering-stick deflection in [0, 1], fed by the main loop each cycle
    translation_intensity: f32,
    /// Bench-test override: linear throttle map, no translation modulation
    direct_esc_control: bool,
    /// Commanded servo pulse widths for telemetry, updated in ServoPwm mode
    pulse_us: [u16; 2],
}

impl<O: MotorOutputs> FiringEngine<O> {
    /// Create a new engine in the given drive mode, motors at neutral
    pub fn new(outputs: O, mode: DriveMode) -> Self {
        Self {
            outputs,
            mode,
            translation_intensity: 0.0,
            direct_esc_control: false,
            pulse_us: [config::NEUTRAL_PULSE_US; 2],
        }
    }

    /// Active drive mode
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Borrow the physical outputs
    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Mutably borrow the physical outputs
    pub fn outputs_mut(&mut self) -> &mut O {
        &mut self.outputs
    }

    /// Update the translation intensity used by ServoPwm firing and coasting
    pub fn set_translation_intensity(&mut self, intensity: f32) {
        self.translation_intensity = intensity.clamp(0.0, 1.0);
    }

    /// Enable or disable the direct ESC control override
    ///
    /// Reserved for bench testing and ESC calibration; never active during
    /// normal operation.
    pub fn set_direct_esc_control(&mut self, enabled: bool) {
        self.direct_esc_control = enabled;
    }

    /// Whether the direct ESC control override is active
    pub fn direct_esc_control(&self) -> bool {
        self.direct_esc_control
    }

    /// Last commanded pulse width for a motor (µs, neutral 1500)
    pub fn pulse_width_us(&self, motor: MotorId) -> u16 {
        self.pulse_us[motor.index()]
    }

    /// Fire a motor for the powered phase of the rotation
    pub fn motor_on(
        &mut self,
        throttle_percent: f32,
        motor: MotorId,
        is_translating: bool,
    ) -> Result<()> {
        match self.mode {
            DriveMode::Binary => self.outputs.set_level(motor, true),
            DriveMode::FixedPwm => self.outputs.set_duty(motor, config::PWM_MOTOR_ON),
            DriveMode::DynamicPwm => {
                let frac =
                    (throttle_percent / config::DYNAMIC_PWM_THROTTLE_PERCENT_MAX).clamp(0.0, 1.0);
                let span = (config::PWM_MOTOR_ON - config::PWM_MOTOR_COAST) as f32;
                let duty = config::PWM_MOTOR_COAST + (span * frac) as u8;
                self.outputs.set_duty(motor, duty)
            }
            DriveMode::ServoPwm => {
                let throttle = if self.direct_esc_control {
                    // Linear map for bench testing, translation bypassed
                    throttle_percent
                } else if is_translating {
                    // Translation overrides user throttle: the configured
                    // ceiling scaled by stick deflection, so zero deflection
                    // collapses to neutral
                    config::SERVO_PWM_TRANSLATE_PERCENT * self.translation_intensity
                } else {
                    throttle_percent
                };
                self.write_servo(motor, throttle)
            }
        }
    }

    /// Coast a motor for the unpowered phase of the rotation
    ///
    /// In ServoPwm mode the coast pulse blends between full neutral return
    /// and a configured fraction of the current pulse width, with translation
    /// intensity as the blend factor. A zero-translation hard stop therefore
    /// returns exactly to neutral instead of slamming the ESC between full
    /// forward and full reverse.
    pub fn motor_coast(&mut self, motor: MotorId) -> Result<()> {
        match self.mode {
            DriveMode::Binary => self.outputs.set_level(motor, false),
            DriveMode::FixedPwm | DriveMode::DynamicPwm => {
                self.outputs.set_duty(motor, config::PWM_MOTOR_COAST)
            }
            DriveMode::ServoPwm => {
                if self.direct_esc_control {
                    return self.write_servo(motor, 0.0);
                }
                let current = self.pulse_us[motor.index()] as f32;
                let neutral = config::NEUTRAL_PULSE_US as f32;
                let offset = (current - neutral)
                    * config::SERVO_PWM_COAST_PERCENT
                    * self.translation_intensity;
                self.write_servo_raw(motor, neutral + offset)
            }
        }
    }

    /// Stop a motor entirely
    pub fn motor_off(&mut self, motor: MotorId) -> Result<()> {
        match self.mode {
            DriveMode::Binary => self.outputs.set_level(motor, false),
            DriveMode::FixedPwm | DriveMode::DynamicPwm => {
                self.outputs.set_duty(motor, config::PWM_MOTOR_OFF)
            }
            DriveMode::ServoPwm => self.write_servo(motor, 0.0),
        }
    }

    /// Stop both motors
    pub fn motors_off(&mut self) -> Result<()> {
        self.motor_off(MotorId::Motor1)?;
        self.motor_off(MotorId::Motor2)
    }

    /// Write a servo pulse from a throttle fraction in [0, 1]
    fn write_servo(&mut self, motor: MotorId, throttle: f32) -> Result<()> {
        let pulse =
            config::NEUTRAL_PULSE_US as f32 + throttle * config::SERVO_HALF_RANGE_US;
        self.write_servo_raw(motor, pulse)
    }

    fn write_servo_raw(&mut self, motor: MotorId, pulse: f32) -> Result<()> {
        // Round to the nearest microsecond so repeated coast blends do not
        // drift low through float truncation
        let pulse = libm::roundf(pulse) as u16;
        self.outputs.set_pulse_us(motor, pulse)?;
        self.pulse_us[motor.index()] = pulse;
        Ok(())
    }
}
