//! Compile-time configuration
//!
//! All commonly tuned settings for the drive core live here. "DEFAULT"
//! calibration values are starting points only; the interactive config-mode
//! workflow overwrites them in persistent storage (see [`crate::parameters`]).

// ---------- RC pulse decoding ----------

/// Shortest pulse accepted as a valid RC sample (µs)
pub const MIN_RC_PULSE_US: u32 = 750;
/// Longest pulse accepted as a valid RC sample (µs)
pub const MAX_RC_PULSE_US: u32 = 2250;

/// Throttle pulse at or below which the stick reads 0%
pub const IDLE_THROTTLE_PULSE_US: u32 = 1100;
/// Throttle pulse at or above which the stick reads 100%
pub const FULL_THROTTLE_PULSE_US: u32 = 1850;

/// Bidirectional transmitters idle near 1500 µs; anything inside this band
/// reads 0% throttle.
pub const NEUTRAL_BAND_LOW_US: u32 = 1450;
pub const NEUTRAL_BAND_HIGH_US: u32 = 1550;

/// Stick center for the left/right channel (µs)
pub const CENTER_LEFTRIGHT_PULSE_US: u32 = 1500;
/// Stick center for the forward/back channel (µs)
pub const CENTER_FORBACK_PULSE_US: u32 = 1500;

/// Wide dead-zone used for config-mode stick-centering detection (µs)
pub const LR_CONFIG_MODE_DEADZONE_US: i32 = 100;
/// Narrow dead-zone used for normal-drive steering (µs)
pub const LR_NORMAL_DEADZONE_US: i32 = 30;

/// Forward/back deflection below this commands no translation (µs)
pub const FORBACK_MIN_THRESH_US: i32 = 150;
/// Forward/back deflection treated as full translation intensity (µs)
pub const FORBACK_FULL_DEFLECTION_US: i32 = 450;

/// RC signal is considered lost after this long without a valid pulse
pub const MAX_MS_BETWEEN_RC_UPDATES: u32 = 1000;

// ---------- Motor / throttle ----------

/// Neutral servo pulse width (µs): 0% throttle on a bidirectional ESC
pub const NEUTRAL_PULSE_US: u16 = 1500;
/// Half the usable servo range: 1500 ± 500 µs spans full reverse to full forward
pub const SERVO_HALF_RANGE_US: f32 = 500.0;

/// PWM duty (0-255) for the powered phase in the fixed/dynamic PWM modes
pub const PWM_MOTOR_ON: u8 = 230;
/// PWM duty (0-255) for the coast phase
pub const PWM_MOTOR_COAST: u8 = 100;
/// PWM duty (0-255) when the robot is spun down (too low and the ESC may not init)
pub const PWM_MOTOR_OFF: u8 = 100;

/// Throttle range dynamic PWM scales over; duty locks at PWM_MOTOR_ON above this
pub const DYNAMIC_PWM_THROTTLE_PERCENT_MAX: f32 = 1.0;

/// Powered-phase ceiling in servo mode as a fraction of full throttle
/// (1.0 = 2000 µs, 0.5 = 1750 µs). Overrides user throttle while translating.
pub const SERVO_PWM_TRANSLATE_PERCENT: f32 = 1.0;

/// Coast keeps this fraction of the current pulse width at full translation
/// intensity. Prevents voltage spikes from neutral-slamming damped-mode ESCs.
pub const SERVO_PWM_COAST_PERCENT: f32 = 0.9;

/// Fraction of each rotation the motors are powered while translating
pub const TRANSLATE_ON_PORTION: f32 = 0.5;

// ---------- Melty / spin control ----------

/// Full-power spin-up below this RPM (no translation attempted)
pub const MIN_TRANSLATION_RPM: u32 = 250;

/// How quick heading adjustment is (larger = slower steering)
pub const LEFT_RIGHT_HEADING_CONTROL_DIVISOR: f32 = 1.5;

/// Centripetal model constant: rpm = sqrt(g / (RPM_ACCEL_CONSTANT * radius_cm))
pub const RPM_ACCEL_CONSTANT: f32 = 0.000_011_18;

// ---------- Battery monitor ----------

/// Heading LED flickers / failsafe triggers when voltage drops below this
pub const BATTERY_WARN_VOLTAGE: f32 = 7.0;
/// ADC reference voltage used for battery maths
pub const ADC_REFERENCE_VOLTAGE: f32 = 5.0;
/// Full-scale ADC reading
pub const ADC_FULL_SCALE: u16 = 1023;
/// Voltage divider ratio on the battery sense pin (~10:1 works well)
pub const VOLTAGE_DIVIDER: f32 = 11.0;
/// This many consecutive below-threshold reads are required before alarming
pub const LOW_BAT_REPEAT_READS_BEFORE_ALARM: u32 = 20;
/// Gate battery failsafe behind an explicit enable
pub const BATTERY_ALERT_ENABLED: bool = true;

// ---------- Safety ----------

/// Watchdog timeout (ms); generous to survive dashboard work in the loop
pub const WATCHDOG_TIMEOUT_MS: u32 = 5000;

/// Require RC throttle at 0% for a full signal-timeout window before arming.
/// Prevents spin-up at power-on if the transmitter was left with throttle up.
pub const VERIFY_RC_THROTTLE_ZERO_AT_BOOT: bool = true;

// ---------- Calibration defaults ----------

/// Radius of the accelerometer from the center of rotation (cm)
pub const DEFAULT_ACCEL_MOUNT_RADIUS_CM: f32 = 10.0;
/// Heading-LED offset, percent of a rotation (0-99, increasing moves the beacon clockwise)
pub const DEFAULT_LED_OFFSET_PERCENT: u8 = 0;
/// Accelerometer reading at rest (G); adjusts out any DC offset
pub const DEFAULT_ACCEL_ZERO_G_OFFSET: f32 = 1.5;
/// Changing this value invalidates stored calibration (reverts to defaults)
pub const CALIBRATION_SENTINEL: u8 = 42;

// ---------- Config mode ----------

/// Hold the left/right stick outside the wide dead-zone this long (at zero
/// throttle) to toggle config mode
pub const CONFIG_MODE_HOLD_MS: u32 = 3000;

// ---------- Telemetry ----------

/// Global minimum spacing between accepted log entries (ms)
pub const MIN_MS_BETWEEN_LOG_ENTRIES: u32 = 50;
/// Snapshot rebuild cadence ceiling (ms): rebuild at least this often
pub const MAX_MS_BETWEEN_SNAPSHOT_REBUILDS: u32 = 250;
/// Snapshot rebuild floor (ms): pending data forces a rebuild once this old
pub const MIN_MS_BETWEEN_SNAPSHOT_REBUILDS: u32 = 50;
