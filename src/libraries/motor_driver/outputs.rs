//! Motor output adapters over the platform traits
//!
//! One adapter per actuation flavor; each forwards the single output channel
//! its hardware supports and leaves the others as the trait's no-op default.

use super::{MotorId, MotorOutputs};
use crate::platform::{GpioInterface, PwmInterface, Result, ServoInterface};

/// Digital on/off outputs for Binary drive
#[derive(Debug)]
pub struct GpioMotorOutputs<A: GpioInterface, B: GpioInterface> {
    pub motor1: A,
    pub motor2: B,
}

impl<A: GpioInterface, B: GpioInterface> MotorOutputs for GpioMotorOutputs<A, B> {
    fn set_level(&mut self, motor: MotorId, high: bool) -> Result<()> {
        match (motor, high) {
            (MotorId::Motor1, true) => self.motor1.set_high(),
            (MotorId::Motor1, false) => self.motor1.set_low(),
            (MotorId::Motor2, true) => self.motor2.set_high(),
            (MotorId::Motor2, false) => self.motor2.set_low(),
        }
    }
}

/// Duty-cycle outputs for FixedPwm / DynamicPwm drive
#[derive(Debug)]
pub struct PwmMotorOutputs<A: PwmInterface, B: PwmInterface> {
    pub motor1: A,
    pub motor2: B,
}

impl<A: PwmInterface, B: PwmInterface> MotorOutputs for PwmMotorOutputs<A, B> {
    fn set_duty(&mut self, motor: MotorId, duty: u8) -> Result<()> {
        match motor {
            MotorId::Motor1 => self.motor1.set_duty(duty),
            MotorId::Motor2 => self.motor2.set_duty(duty),
        }
    }
}

/// Servo pulse outputs for ServoPwm drive
#[derive(Debug)]
pub struct ServoMotorOutputs<A: ServoInterface, B: ServoInterface> {
    pub motor1: A,
    pub motor2: B,
}

impl<A: ServoInterface, B: ServoInterface> MotorOutputs for ServoMotorOutputs<A, B> {
    fn set_pulse_us(&mut self, motor: MotorId, pulse_us: u16) -> Result<()> {
        match motor {
            MotorId::Motor1 => self.motor1.write_microseconds(pulse_us),
            MotorId::Motor2 => self.motor2.write_microseconds(pulse_us),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::motor_driver::{DriveMode, FiringEngine};
    use crate::platform::mock::{MockGpio, MockPwm, MockServo};

    #[test]
    fn test_gpio_outputs_drive_pins() {
        let outputs = GpioMotorOutputs {
            motor1: MockGpio::new(),
            motor2: MockGpio::new(),
        };
        let mut engine = FiringEngine::new(outputs, DriveMode::Binary);

        engine.motor_on(1.0, MotorId::Motor1, false).unwrap();
        assert!(engine.outputs().motor1.read());
        assert!(!engine.outputs().motor2.read());

        engine.motors_off().unwrap();
        assert!(!engine.outputs().motor1.read());
    }

    #[test]
    fn test_pwm_outputs_drive_duty() {
        let outputs = PwmMotorOutputs {
            motor1: MockPwm::new(),
            motor2: MockPwm::new(),
        };
        let mut engine = FiringEngine::new(outputs, DriveMode::FixedPwm);

        engine.motor_on(0.5, MotorId::Motor2, false).unwrap();
        assert_eq!(engine.outputs().motor2.duty(), crate::config::PWM_MOTOR_ON);
    }

    #[test]
    fn test_servo_outputs_drive_pulse_widths() {
        let outputs = ServoMotorOutputs {
            motor1: MockServo::new(),
            motor2: MockServo::new(),
        };
        let mut engine = FiringEngine::new(outputs, DriveMode::ServoPwm);

        engine.motor_on(1.0, MotorId::Motor1, false).unwrap();
        assert_eq!(engine.outputs().motor1.pulse_width_us(), 2000);
        assert_eq!(engine.outputs().motor2.pulse_width_us(), 1500);
    }
}
