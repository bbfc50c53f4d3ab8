//! Main control loop
//!
//! [`MeltyBrain`] is the explicit context object owning every mutable
//! component; there are no process-wide singletons. The RC decoder and the
//! telemetry aggregator are borrowed rather than owned because other
//! execution contexts reach them too: pin interrupts feed the decoder, and
//! the dashboard task reads the telemetry.
//!
//! `run_cycle` is the only place with an ordering contract:
//!
//! 1. Service the watchdog.
//! 2. Locked read of all RC channels.
//! 3. Battery sample and safety evaluation.
//! 4. Failsafe or zero throttle forces motors off (config-mode entry is
//!    checked here, at zero throttle).
//! 5. Otherwise spin control drives the motors and the heading LED.
//! 6. Telemetry readings are staged and the snapshot is rebuilt on cadence.

pub mod config_mode;
pub mod spin;

pub use config_mode::{ConfigModeEvent, ConfigModeTracker};
pub use spin::{SpinState, SpinTracker};

use crate::config;
use crate::core::safety::{BatteryMonitor, SafetySupervisor, SafetyState};
use crate::core::telemetry::{LogLevel, SharedTelemetry};
use crate::devices::{Accelerometer, HeadingIndicator};
use crate::libraries::motor_driver::{DriveMode, FiringEngine, MotorId, MotorOutputs};
use crate::libraries::rc_channel::{RcDecoder, RcInputs};
use crate::parameters::{CalibrationRecord, CalibrationStore};
use crate::platform::{AdcInterface, Result, StorageInterface, WatchdogInterface};

/// Melty-brain drive context
pub struct MeltyBrain<'a, O, A, L, W, AD, S>
where
    O: MotorOutputs,
    A: Accelerometer,
    L: HeadingIndicator,
    W: WatchdogInterface,
    AD: AdcInterface,
    S: StorageInterface,
{
    decoder: &'a RcDecoder,
    telemetry: &'a SharedTelemetry,
    engine: FiringEngine<O>,
    safety: SafetySupervisor,
    battery: BatteryMonitor,
    spin: SpinTracker,
    config_mode: ConfigModeTracker,
    calibration: CalibrationRecord,
    accel: A,
    heading_led: L,
    watchdog: W,
    battery_adc: AD,
    storage: S,
}

impl<'a, O, A, L, W, AD, S> MeltyBrain<'a, O, A, L, W, AD, S>
where
    O: MotorOutputs,
    A: Accelerometer,
    L: HeadingIndicator,
    W: WatchdogInterface,
    AD: AdcInterface,
    S: StorageInterface,
{
    /// Assemble the robot: load calibration, arm the watchdog
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        decoder: &'a RcDecoder,
        telemetry: &'a SharedTelemetry,
        outputs: O,
        drive_mode: DriveMode,
        accel: A,
        heading_led: L,
        mut watchdog: W,
        battery_adc: AD,
        mut storage: S,
    ) -> Self {
        let calibration = CalibrationStore::load(&mut storage);
        watchdog.start(config::WATCHDOG_TIMEOUT_MS);
        telemetry.with(|t| {
            t.set_calibration(calibration);
            t.log(LogLevel::Info, "main", "boot", 0);
        });
        Self {
            decoder,
            telemetry,
            engine: FiringEngine::new(outputs, drive_mode),
            safety: SafetySupervisor::new(),
            battery: BatteryMonitor::new(),
            spin: SpinTracker::new(),
            config_mode: ConfigModeTracker::new(),
            calibration,
            accel,
            heading_led,
            watchdog,
            battery_adc,
            storage,
        }
    }

    /// Current safety state
    pub fn safety_state(&self) -> SafetyState {
        self.safety.state()
    }

    /// Whether config mode is active
    pub fn config_mode_active(&self) -> bool {
        self.config_mode.is_active()
    }

    /// Active calibration values
    pub fn calibration(&self) -> &CalibrationRecord {
        &self.calibration
    }

    /// Last commanded pulse width for a motor (µs)
    pub fn motor_pulse_us(&self, motor: MotorId) -> u16 {
        self.engine.pulse_width_us(motor)
    }

    /// Operator e-stop: permanent failsafe
    pub fn hard_stop(&mut self) {
        self.safety.hard_stop();
    }

    /// Bench-test override on the firing engine
    pub fn set_direct_esc_control(&mut self, enabled: bool) {
        self.engine.set_direct_esc_control(enabled);
    }

    /// Run one control cycle at the given uptime
    ///
    /// Both counters come from the platform timer and wrap independently;
    /// deriving `now_ms` from the wrapped microsecond value would make every
    /// millisecond timeout misfire once per microsecond wrap (~71 minutes).
    pub fn run_cycle(&mut self, now_us: u32, now_ms: u32) -> Result<()> {
        self.safety.service_watchdog(&mut self.watchdog);

        let inputs = self.decoder.read_inputs(now_ms);
        let throttle_percent = inputs.throttle_percent();

        let voltage = self.battery.sample(&mut self.battery_adc);
        let battery_critical = self.battery.is_critical();
        {
            let safety = &mut self.safety;
            self.telemetry.with(|t| {
                safety.evaluate(now_ms, inputs.healthy, throttle_percent, battery_critical, t);
            });
        }

        let g_force = self.accel.read_g_force();
        let (ax, ay, az) = self.accel.read_axes();
        let g_used = (g_force - self.calibration.zero_g_offset).max(0.0);

        if !self.safety.motors_allowed() || throttle_percent == 0 {
            self.engine.motors_off()?;
            self.spun_down(now_ms, &inputs, g_force);
        } else {
            self.drive(now_us, g_force, &inputs, throttle_percent)?;
        }

        let motor1_us = self.engine.pulse_width_us(MotorId::Motor1);
        let motor2_us = self.engine.pulse_width_us(MotorId::Motor2);
        let calibration = self.calibration;
        self.telemetry.with(|t| {
            t.set_accel_readings(g_force, g_used, ax, ay, az);
            t.set_rc_readings(inputs.healthy, throttle_percent, inputs.leftright_offset_us());
            t.set_motor_pulses(motor1_us, motor2_us);
            t.set_battery_voltage(config::BATTERY_ALERT_ENABLED.then_some(voltage));
            t.set_calibration(calibration);
            t.maybe_rebuild(now_ms);
        });

        Ok(())
    }

    /// Spin control while armed with throttle up
    fn drive(
        &mut self,
        now_us: u32,
        g_force: f32,
        inputs: &RcInputs,
        throttle_percent: u8,
    ) -> Result<()> {
        let state = self.spin.update(now_us, g_force, &self.calibration, inputs);
        self.engine
            .set_translation_intensity(inputs.translation_intensity());
        let throttle = throttle_percent as f32 / 100.0;

        if state.translating {
            if state.motor1_powered {
                self.engine.motor_on(throttle, MotorId::Motor1, true)?;
            } else {
                self.engine.motor_coast(MotorId::Motor1)?;
            }
            if state.motor2_powered {
                self.engine.motor_on(throttle, MotorId::Motor2, true)?;
            } else {
                self.engine.motor_coast(MotorId::Motor2)?;
            }
        } else {
            self.engine.motor_on(throttle, MotorId::Motor1, false)?;
            self.engine.motor_on(throttle, MotorId::Motor2, false)?;
        }

        if state.led_on {
            self.heading_led.indicator_on(self.config_mode.is_active());
        } else {
            self.heading_led.indicator_off();
        }
        Ok(())
    }

    /// Housekeeping while the motors are off
    ///
    /// Config mode can only be toggled here: armed, healthy signal, zero
    /// throttle. Entry captures the resting accelerometer reading as the new
    /// zero-G offset and persists it.
    fn spun_down(&mut self, now_ms: u32, inputs: &RcInputs, g_force: f32) {
        if self.safety.motors_allowed() && inputs.healthy {
            if let Some(event) = self.config_mode.update(now_ms, inputs) {
                match event {
                    ConfigModeEvent::Entered => {
                        self.calibration.zero_g_offset = g_force;
                        let saved = CalibrationStore::save(&mut self.storage, &self.calibration);
                        let calibration = self.calibration;
                        self.telemetry.with(|t| {
                            t.set_calibration(calibration);
                            if saved.is_err() {
                                t.log(
                                    LogLevel::Error,
                                    "config",
                                    "calibration save failed",
                                    now_ms,
                                );
                            } else {
                                t.log_fmt(
                                    LogLevel::Info,
                                    "config",
                                    format_args!(
                                        "config mode on, zero-G now {:.2}",
                                        calibration.zero_g_offset
                                    ),
                                    now_ms,
                                );
                            }
                        });
                    }
                    ConfigModeEvent::Exited => {
                        self.telemetry.with(|t| {
                            t.log(LogLevel::Info, "config", "config mode off", now_ms);
                        });
                    }
                }
            }
        } else {
            self.config_mode.reset_hold();
        }

        // Spun down the LED is a steady beacon, flickering in config mode
        self.heading_led.indicator_on(self.config_mode.is_active());
    }
}
