//! RC input decoding
//!
//! This module converts pin-edge timestamps into validated pulse widths per
//! channel, including:
//! - Pulse measurement (rising edge records start, falling edge computes width)
//! - Range validation with a last-known-good policy
//! - Timeout detection per channel
//! - Derived values (throttle percent, stick offsets, dead-zones)
//!
//! The edge handler runs at interrupt priority while the main loop reads, so
//! every field is an atomic and the whole-read path is guarded by a
//! non-blocking reader-exclusion flag. An ISR never blocks: if the flag is
//! held, the handler drops that one sample and counts it.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config;

/// RC channel identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcChannelId {
    /// Spin throttle
    Throttle,
    /// Steering (heading adjust while spinning)
    LeftRight,
    /// Translation (forward/back thrust while spinning)
    ForBack,
}

/// Forward/back stick direction after the translation threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickDirection {
    Forward,
    Neutral,
    Backward,
}

/// Single RC channel state
///
/// Written by the edge handler, read by the main loop. Fields are individually
/// atomic; the consolidated read in [`RcDecoder::read_inputs`] provides the
/// cross-channel consistency.
#[derive(Debug)]
struct RcChannel {
    /// Last accepted pulse width in microseconds, 0 until first acceptance
    pulse_width_us: AtomicU32,
    /// Timestamp of the most recent rising edge
    pulse_start_us: AtomicU32,
    /// Uptime of the last accepted sample in ms, 0 until first acceptance
    last_good_signal_ms: AtomicU32,
    /// Set when a rising edge was skipped: the stored start is stale, so the
    /// next falling edge must be discarded rather than measured
    discard_next: AtomicBool,
}

impl RcChannel {
    const fn new() -> Self {
        Self {
            pulse_width_us: AtomicU32::new(0),
            pulse_start_us: AtomicU32::new(0),
            last_good_signal_ms: AtomicU32::new(0),
            discard_next: AtomicBool::new(false),
        }
    }

    fn on_edge(&self, level: bool, now_us: u32, now_ms: u32) {
        if level {
            self.pulse_start_us.store(now_us, Ordering::Relaxed);
            return;
        }

        let start = self.pulse_start_us.load(Ordering::Relaxed);
        // Timer wraparound makes now_us <= start; that sample is dropped.
        if now_us <= start {
            return;
        }
        let width = now_us - start;
        if (config::MIN_RC_PULSE_US..=config::MAX_RC_PULSE_US).contains(&width) {
            self.pulse_width_us.store(width, Ordering::Relaxed);
            self.last_good_signal_ms.store(now_ms, Ordering::Relaxed);
        }
        // Out-of-range widths are glitches or partial pulses: silently
        // ignored, previous value retained.
    }

    fn is_healthy(&self, now_ms: u32) -> bool {
        let last = self.last_good_signal_ms.load(Ordering::Relaxed);
        if last == 0 {
            return false;
        }
        now_ms.wrapping_sub(last) <= config::MAX_MS_BETWEEN_RC_UPDATES
    }
}

/// Consolidated RC reading taken under the reader-exclusion flag
///
/// All derived values (throttle percent, offsets, dead-zones) are pure
/// functions of this snapshot, so the main loop decides once per cycle from
/// one consistent set of pulse widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcInputs {
    /// Throttle pulse width in µs, 0 before the first valid sample
    pub throttle_us: u32,
    /// Left/right pulse width in µs, 0 before the first valid sample
    pub leftright_us: u32,
    /// Forward/back pulse width in µs, 0 before the first valid sample
    pub forback_us: u32,
    /// All channels accepted a sample within the timeout window
    pub healthy: bool,
}

impl RcInputs {
    /// Neutral inputs with no signal, as at power-up
    pub const fn no_signal() -> Self {
        Self {
            throttle_us: 0,
            leftright_us: 0,
            forback_us: 0,
            healthy: false,
        }
    }

    /// Throttle as 0-100
    ///
    /// Three zones: at or above the full-throttle boundary reads 100; the
    /// neutral band around center and everything at or below the idle
    /// boundary read 0 (covers both unidirectional-idle and
    /// bidirectional-center transmitters); linear in between, clamped.
    pub fn throttle_percent(&self) -> u8 {
        let w = self.throttle_us;
        if w >= config::FULL_THROTTLE_PULSE_US {
            return 100;
        }
        if w <= config::IDLE_THROTTLE_PULSE_US
            || (config::NEUTRAL_BAND_LOW_US..=config::NEUTRAL_BAND_HIGH_US).contains(&w)
        {
            return 0;
        }
        let (zero, span) = if w > config::NEUTRAL_BAND_HIGH_US {
            (
                config::NEUTRAL_BAND_HIGH_US,
                config::FULL_THROTTLE_PULSE_US - config::NEUTRAL_BAND_HIGH_US,
            )
        } else {
            (
                config::IDLE_THROTTLE_PULSE_US,
                config::FULL_THROTTLE_PULSE_US - config::IDLE_THROTTLE_PULSE_US,
            )
        };
        let percent = (w - zero) * 100 / span;
        percent.min(100) as u8
    }

    /// Steering stick offset from center in µs, signed
    pub fn leftright_offset_us(&self) -> i32 {
        self.leftright_us as i32 - config::CENTER_LEFTRIGHT_PULSE_US as i32
    }

    /// Translation stick offset from center in µs, signed
    pub fn forback_offset_us(&self) -> i32 {
        self.forback_us as i32 - config::CENTER_FORBACK_PULSE_US as i32
    }

    /// Steering stick centered within the wide config-mode dead-zone
    pub fn leftright_in_config_deadzone(&self) -> bool {
        self.leftright_offset_us().abs() < config::LR_CONFIG_MODE_DEADZONE_US
    }

    /// Steering stick centered within the narrow normal-drive dead-zone
    pub fn leftright_in_normal_deadzone(&self) -> bool {
        self.leftright_offset_us().abs() < config::LR_NORMAL_DEADZONE_US
    }

    /// Translation stick direction past the minimum threshold
    pub fn forback_direction(&self) -> StickDirection {
        let offset = self.forback_offset_us();
        if offset > config::FORBACK_MIN_THRESH_US {
            StickDirection::Forward
        } else if offset < -config::FORBACK_MIN_THRESH_US {
            StickDirection::Backward
        } else {
            StickDirection::Neutral
        }
    }

    /// Commanded translation intensity in [0, 1]
    ///
    /// Deflection up to the minimum threshold reads 0; full configured
    /// deflection reads 1; linear in between.
    pub fn translation_intensity(&self) -> f32 {
        let deflection = self.forback_offset_us().unsigned_abs() as f32;
        let min = config::FORBACK_MIN_THRESH_US as f32;
        let full = config::FORBACK_FULL_DEFLECTION_US as f32;
        ((deflection - min) / (full - min)).clamp(0.0, 1.0)
    }
}

/// RC channel decoder
///
/// One instance covers the three channels. The edge handler side takes
/// `&self` so it can be called from interrupt context.
#[derive(Debug)]
pub struct RcDecoder {
    throttle: RcChannel,
    leftright: RcChannel,
    forback: RcChannel,
    /// Reader-exclusion flag; set while the main loop reads all channels
    locked: AtomicBool,
    /// Samples dropped because an edge arrived while locked
    dropped_samples: AtomicU32,
}

impl Default for RcDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RcDecoder {
    /// Create a new decoder with no signal on any channel
    pub const fn new() -> Self {
        Self {
            throttle: RcChannel::new(),
            leftright: RcChannel::new(),
            forback: RcChannel::new(),
            locked: AtomicBool::new(false),
            dropped_samples: AtomicU32::new(0),
        }
    }

    fn channel(&self, id: RcChannelId) -> &RcChannel {
        match id {
            RcChannelId::Throttle => &self.throttle,
            RcChannelId::LeftRight => &self.leftright,
            RcChannelId::ForBack => &self.forback,
        }
    }

    /// Record a pin edge (interrupt context)
    ///
    /// Rising edges record the pulse start; falling edges compute the width
    /// and accept it only within the valid pulse range. If the reader holds
    /// the exclusion flag the edge is skipped and the lost sample is counted
    /// in [`dropped_samples`]: a skipped falling edge loses its sample on the
    /// spot, while a skipped rising edge marks the channel so the next
    /// falling edge (which would pair with a stale start) is discarded and
    /// counted then. Either way one pulse counts as exactly one drop.
    ///
    /// [`dropped_samples`]: RcDecoder::dropped_samples
    pub fn on_edge(&self, id: RcChannelId, level: bool, now_us: u32, now_ms: u32) {
        let channel = self.channel(id);
        if self.locked.load(Ordering::Acquire) {
            if level {
                channel.discard_next.store(true, Ordering::Relaxed);
            } else {
                channel.discard_next.store(false, Ordering::Relaxed);
                self.dropped_samples.fetch_add(1, Ordering::Relaxed);
            }
            return;
        }
        if !level && channel.discard_next.swap(false, Ordering::Relaxed) {
            self.dropped_samples.fetch_add(1, Ordering::Relaxed);
            return;
        }
        channel.on_edge(level, now_us, now_ms);
    }

    /// Set the reader-exclusion flag
    pub fn lock(&self) {
        self.locked.store(true, Ordering::Release);
    }

    /// Clear the reader-exclusion flag
    pub fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    /// Consolidated main-loop read of all channels
    ///
    /// Performs the paired lock/unlock around the whole read so the three
    /// pulse widths come from one instant.
    pub fn read_inputs(&self, now_ms: u32) -> RcInputs {
        self.lock();
        let inputs = RcInputs {
            throttle_us: self.throttle.pulse_width_us.load(Ordering::Relaxed),
            leftright_us: self.leftright.pulse_width_us.load(Ordering::Relaxed),
            forback_us: self.forback.pulse_width_us.load(Ordering::Relaxed),
            healthy: self.signal_is_healthy(now_ms),
        };
        self.unlock();
        inputs
    }

    /// All channels accepted a valid sample within the timeout window
    ///
    /// False until every channel has seen at least one valid pulse, and false
    /// again once any channel goes `MAX_MS_BETWEEN_RC_UPDATES` without one.
    pub fn signal_is_healthy(&self, now_ms: u32) -> bool {
        self.throttle.is_healthy(now_ms)
            && self.leftright.is_healthy(now_ms)
            && self.forback.is_healthy(now_ms)
    }

    /// Samples lost to the reader-exclusion flag since boot
    pub fn dropped_samples(&self) -> u32 {
        self.dropped_samples.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed one complete pulse of the given width ending at `end_us`
    fn pulse(decoder: &RcDecoder, id: RcChannelId, width_us: u32, end_us: u32, now_ms: u32) {
        decoder.on_edge(id, true, end_us - width_us, now_ms);
        decoder.on_edge(id, false, end_us, now_ms);
    }

    fn pulse_all(decoder: &RcDecoder, width_us: u32, end_us: u32, now_ms: u32) {
        pulse(decoder, RcChannelId::Throttle, width_us, end_us, now_ms);
        pulse(decoder, RcChannelId::LeftRight, width_us, end_us, now_ms);
        pulse(decoder, RcChannelId::ForBack, width_us, end_us, now_ms);
    }

    #[test]
    fn test_valid_pulse_width_is_stored_exactly() {
        let decoder = RcDecoder::new();
        for width in [750, 1100, 1500, 1850, 2250] {
            pulse(&decoder, RcChannelId::Throttle, width, 100_000, 100);
            assert_eq!(decoder.read_inputs(100).throttle_us, width);
        }
    }

    #[test]
    fn test_out_of_range_pulse_retains_previous_value() {
        let decoder = RcDecoder::new();
        pulse(&decoder, RcChannelId::Throttle, 1600, 100_000, 100);

        // Too short (glitch) and too long (partial pulse)
        pulse(&decoder, RcChannelId::Throttle, 300, 200_000, 200);
        pulse(&decoder, RcChannelId::Throttle, 5000, 300_000, 300);

        assert_eq!(decoder.read_inputs(300).throttle_us, 1600);
    }

    #[test]
    fn test_timer_wraparound_drops_one_sample() {
        let decoder = RcDecoder::new();
        // Rising edge just before wrap, falling edge after
        decoder.on_edge(RcChannelId::Throttle, true, u32::MAX - 100, 100);
        decoder.on_edge(RcChannelId::Throttle, false, 1400, 100);

        assert_eq!(decoder.read_inputs(100).throttle_us, 0);
    }

    #[test]
    fn test_signal_health_lifecycle() {
        let decoder = RcDecoder::new();

        // Unhealthy until every channel has a valid sample
        assert!(!decoder.signal_is_healthy(100));
        pulse(&decoder, RcChannelId::Throttle, 1500, 100_000, 100);
        assert!(!decoder.signal_is_healthy(100));
        pulse(&decoder, RcChannelId::LeftRight, 1500, 100_000, 100);
        pulse(&decoder, RcChannelId::ForBack, 1500, 100_000, 100);
        assert!(decoder.signal_is_healthy(100));

        // Still healthy right at the timeout boundary
        assert!(decoder.signal_is_healthy(100 + 1000));

        // Stale past the timeout
        assert!(!decoder.signal_is_healthy(100 + 1001));

        // Fresh samples recover health
        pulse_all(&decoder, 1500, 2_000_000, 2000);
        assert!(decoder.signal_is_healthy(2000));
    }

    #[test]
    fn test_locked_reader_drops_and_counts_falling_edges() {
        let decoder = RcDecoder::new();
        pulse(&decoder, RcChannelId::Throttle, 1500, 100_000, 100);

        decoder.lock();
        pulse(&decoder, RcChannelId::Throttle, 2000, 200_000, 200);
        decoder.unlock();

        // Sample was dropped, not stored, and the drop is observable
        assert_eq!(decoder.read_inputs(200).throttle_us, 1500);
        assert_eq!(decoder.dropped_samples(), 1);

        // Updates resume after unlock
        pulse(&decoder, RcChannelId::Throttle, 2000, 300_000, 300);
        assert_eq!(decoder.read_inputs(300).throttle_us, 2000);
        assert_eq!(decoder.dropped_samples(), 1);
    }

    #[test]
    fn test_rising_edge_skipped_while_locked_loses_one_sample() {
        let decoder = RcDecoder::new();
        pulse(&decoder, RcChannelId::Throttle, 1500, 100_000, 100);

        // Rising edge lands while the reader holds the flag
        decoder.lock();
        decoder.on_edge(RcChannelId::Throttle, true, 200_000 - 1200, 200);
        decoder.unlock();
        // The matching falling edge pairs with a stale start: discarded and
        // counted instead of measuring a garbage width
        decoder.on_edge(RcChannelId::Throttle, false, 200_000, 200);

        assert_eq!(decoder.read_inputs(200).throttle_us, 1500);
        assert_eq!(decoder.dropped_samples(), 1);

        // The next complete pulse is accepted normally
        pulse(&decoder, RcChannelId::Throttle, 1200, 300_000, 300);
        assert_eq!(decoder.read_inputs(300).throttle_us, 1200);
        assert_eq!(decoder.dropped_samples(), 1);
    }

    #[test]
    fn test_health_independent_of_us_counter_wrap() {
        let decoder = RcDecoder::new();

        // Pulses end 100 us before the 32-bit us counter wraps; the ms
        // uptime counter keeps counting through the wrap
        pulse_all(&decoder, 1500, u32::MAX - 100, 4_294_967);
        assert!(decoder.signal_is_healthy(4_294_967));

        // 30 ms of real time later the us counter has wrapped around
        assert!(decoder.signal_is_healthy(4_294_997));
        assert_eq!(decoder.read_inputs(4_294_997).throttle_us, 1500);
    }

    #[test]
    fn test_throttle_percent_zones() {
        let mut inputs = RcInputs::no_signal();

        // Idle and below
        inputs.throttle_us = 1000;
        assert_eq!(inputs.throttle_percent(), 0);
        inputs.throttle_us = 1100;
        assert_eq!(inputs.throttle_percent(), 0);

        // Neutral band
        for w in [1450, 1500, 1550] {
            inputs.throttle_us = w;
            assert_eq!(inputs.throttle_percent(), 0);
        }

        // Full throttle and beyond
        inputs.throttle_us = 1850;
        assert_eq!(inputs.throttle_percent(), 100);
        inputs.throttle_us = 2100;
        assert_eq!(inputs.throttle_percent(), 100);

        // Midpoint of the upper linear zone
        inputs.throttle_us = 1700;
        assert_eq!(inputs.throttle_percent(), 50);
    }

    #[test]
    fn test_throttle_percent_monotonic_above_neutral() {
        let mut inputs = RcInputs::no_signal();
        let mut last = 0;
        for w in 1551..=1850 {
            inputs.throttle_us = w;
            let percent = inputs.throttle_percent();
            assert!(percent >= last, "non-monotonic at {} us", w);
            last = percent;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_stick_offsets_are_signed_microseconds() {
        let mut inputs = RcInputs::no_signal();
        inputs.leftright_us = 1620;
        inputs.forback_us = 1380;

        assert_eq!(inputs.leftright_offset_us(), 120);
        assert_eq!(inputs.forback_offset_us(), -120);
    }

    #[test]
    fn test_deadzone_widths() {
        let mut inputs = RcInputs::no_signal();

        // Inside narrow, inside wide
        inputs.leftright_us = 1520;
        assert!(inputs.leftright_in_normal_deadzone());
        assert!(inputs.leftright_in_config_deadzone());

        // Outside narrow, inside wide
        inputs.leftright_us = 1560;
        assert!(!inputs.leftright_in_normal_deadzone());
        assert!(inputs.leftright_in_config_deadzone());

        // Outside both
        inputs.leftright_us = 1650;
        assert!(!inputs.leftright_in_normal_deadzone());
        assert!(!inputs.leftright_in_config_deadzone());
    }

    #[test]
    fn test_forback_direction_threshold() {
        let mut inputs = RcInputs::no_signal();

        inputs.forback_us = 1500;
        assert_eq!(inputs.forback_direction(), StickDirection::Neutral);

        inputs.forback_us = 1640;
        assert_eq!(inputs.forback_direction(), StickDirection::Neutral);

        inputs.forback_us = 1700;
        assert_eq!(inputs.forback_direction(), StickDirection::Forward);

        inputs.forback_us = 1300;
        assert_eq!(inputs.forback_direction(), StickDirection::Backward);
    }

    #[test]
    fn test_translation_intensity_range() {
        let mut inputs = RcInputs::no_signal();

        // Below threshold
        inputs.forback_us = 1600;
        assert_eq!(inputs.translation_intensity(), 0.0);

        // Full deflection and beyond clamp to 1
        inputs.forback_us = 1950;
        assert_eq!(inputs.translation_intensity(), 1.0);
        inputs.forback_us = 2200;
        assert_eq!(inputs.translation_intensity(), 1.0);

        // Halfway between threshold (150) and full (450)
        inputs.forback_us = 1800;
        let intensity = inputs.translation_intensity();
        assert!((intensity - 0.5).abs() < 0.01);

        // Symmetric for backward deflection
        inputs.forback_us = 1200;
        let intensity = inputs.translation_intensity();
        assert!((intensity - 0.5).abs() < 0.01);
    }
}
