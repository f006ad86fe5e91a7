//! The canonical fused sensor state
//!
//! One [`SensorState`] instance holds everything the bench tool knows
//! about the instrument. Update methods take raw collaborator readings
//! (status bytes, counter values, ADC counts), run them through the board
//! decoders and the per-channel change tracking, and leave redraw policy
//! to the display consumer: it asks [`SensorState::is_display_dirty`] and
//! clears the flag exactly once per flushed frame.

use crate::config::SensorConfig;
use crate::decode::{decode_fret, decode_strum_keys, StrumKeys};
use crate::state::tracked::Tracked;

/// Highest value of a 10-bit potentiometer reading
const POT_RAW_MAX: u16 = 1023;

/// Accelerometer sample narrowed to the three display bytes
///
/// The bench view prints the low byte of each signed 12-bit count, so the
/// triplet latches as one value: a change in any axis dirties the channel
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl ImuSample {
    /// Narrow raw signed counts to their two's-complement low bytes
    pub const fn from_counts(x: i16, y: i16, z: i16) -> Self {
        Self {
            x: x as u8,
            y: y as u8,
            z: z as u8,
        }
    }
}

/// Fused state of every sensor on the instrument
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorState {
    config: SensorConfig,
    fret: Tracked<u8>,
    strum_keys: Tracked<StrumKeys>,
    encoder_switch: Tracked<bool>,
    encoder_position: Tracked<u8>,
    potentiometer: Tracked<u8>,
    distance_cm: Tracked<u8>,
    imu: Tracked<ImuSample>,
    lefty: Tracked<bool>,
    /// Raw counter value seen by the last encoder update; relative (lefty)
    /// motion is computed from consecutive raw readings
    last_encoder_raw: i32,
}

impl SensorState {
    /// New state with every channel at its zero value, clean
    pub const fn new(config: SensorConfig) -> Self {
        Self {
            config,
            fret: Tracked::new(0),
            strum_keys: Tracked::new(StrumKeys::none()),
            encoder_switch: Tracked::new(false),
            encoder_position: Tracked::new(0),
            potentiometer: Tracked::new(0),
            distance_cm: Tracked::new(0),
            imu: Tracked::new(ImuSample::from_counts(0, 0, 0)),
            lefty: Tracked::new(false),
            last_encoder_raw: 0,
        }
    }

    /// Decode and store the fret board's status bytes
    pub fn update_fret(&mut self, ks0: u8, ks1: u8, ks2: u8) {
        self.fret.update(decode_fret(ks0, ks1, ks2));
    }

    /// Decode and store the strum board's status bytes
    pub fn update_strum_keys(&mut self, ss0: u8, ss1: u8, ss2: u8) {
        self.strum_keys.update(decode_strum_keys(ss0, ss1, ss2));
    }

    /// Store the encoder push-switch state
    pub fn update_encoder_switch(&mut self, pressed: bool) {
        self.encoder_switch.update(pressed);
    }

    /// Fold a raw quadrature counter reading into the clamped position.
    ///
    /// Right-handed, the counter value is the position. Left-handed the
    /// encoder sits upside down, so the delta from the previous raw
    /// reading is applied negated and physical clockwise still raises the
    /// value. The raw shadow refreshes on every call (even when the
    /// clamped position saturates), so a laterality change never replays
    /// a stale delta. Deltas are taken wrapping, so a counter rollover
    /// reads as one small step rather than a huge jump. Returns whether
    /// the stored position changed, for collaborators that react to
    /// encoder motion specifically.
    pub fn update_encoder_position(&mut self, raw: i32) -> bool {
        let candidate = if self.lefty.get() {
            let delta = raw.wrapping_sub(self.last_encoder_raw);
            (self.encoder_position.get() as i32).saturating_sub(delta)
        } else {
            raw
        };
        self.last_encoder_raw = raw;
        let clamped = candidate.clamp(0, self.config.encoder_max as i32) as u8;
        self.encoder_position.update(clamped)
    }

    /// Scale and store a 10-bit potentiometer reading.
    ///
    /// The pot is wired mirror-image between grips: left-handed the value
    /// runs 0-255 straight off the reading, right-handed the travel is
    /// inverted and spans 0-127. Readings above 10 bits clamp first.
    pub fn update_potentiometer(&mut self, raw: u16) {
        let raw = raw.min(POT_RAW_MAX);
        let scaled = if self.lefty.get() {
            (raw >> 2) as u8
        } else {
            ((POT_RAW_MAX - raw) >> 3) as u8
        };
        self.potentiometer.update(scaled);
    }

    /// Store an ultrasonic distance sample, dropping glitch jumps.
    ///
    /// A sample is accepted only when its distance from the stored value
    /// stays below the configured anomaly threshold; the ranger's echo
    /// glitches arrive as near-full-range jumps, while a real move that
    /// far re-approaches in small steps over the next cycles.
    pub fn update_distance(&mut self, sample_cm: u8) {
        let jump = self.distance_cm.get().abs_diff(sample_cm);
        if jump >= self.config.distance_anomaly_threshold {
            return;
        }
        self.distance_cm.update(sample_cm);
    }

    /// Store an accelerometer display sample; the triplet latches together
    pub fn update_imu(&mut self, sample: ImuSample) {
        self.imu.update(sample);
    }

    /// Set the grip laterality, decided by the accelerometer collaborator
    pub fn set_lefty(&mut self, lefty: bool) {
        self.lefty.update(lefty);
    }

    /// Active fret in `1..=19`, `0` meaning open
    pub fn fret(&self) -> u8 {
        self.fret.get()
    }

    /// Strum pad mask
    pub fn strum_keys(&self) -> StrumKeys {
        self.strum_keys.get()
    }

    /// Encoder push-switch state
    pub fn encoder_switch(&self) -> bool {
        self.encoder_switch.get()
    }

    /// Clamped encoder position
    pub fn encoder_position(&self) -> u8 {
        self.encoder_position.get()
    }

    /// Scaled potentiometer value
    pub fn potentiometer(&self) -> u8 {
        self.potentiometer.get()
    }

    /// Last accepted ultrasonic distance in cm
    pub fn distance_cm(&self) -> u8 {
        self.distance_cm.get()
    }

    /// Accelerometer display bytes
    pub fn imu(&self) -> ImuSample {
        self.imu.get()
    }

    /// Whether the instrument is held left-handed
    pub fn is_lefty(&self) -> bool {
        self.lefty.get()
    }

    /// Whether any channel changed since the last display flush.
    ///
    /// Computed on demand from the per-channel dirty bits; there is no
    /// stored aggregate flag to fall out of sync.
    pub fn is_display_dirty(&self) -> bool {
        self.fret.is_dirty()
            || self.strum_keys.is_dirty()
            || self.encoder_switch.is_dirty()
            || self.encoder_position.is_dirty()
            || self.potentiometer.is_dirty()
            || self.distance_cm.is_dirty()
            || self.imu.is_dirty()
            || self.lefty.is_dirty()
    }

    /// Mark every channel clean. The display consumer calls this exactly
    /// once per flushed frame; update methods never touch it.
    pub fn clear_display_dirty(&mut self) {
        self.fret.clear_dirty();
        self.strum_keys.clear_dirty();
        self.encoder_switch.clear_dirty();
        self.encoder_position.clear_dirty();
        self.potentiometer.clear_dirty();
        self.distance_cm.clear_dirty();
        self.imu.clear_dirty();
        self.lefty.clear_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> SensorState {
        SensorState::new(SensorConfig::default())
    }

    #[test]
    fn test_fresh_state_is_clean() {
        let s = state();
        assert_eq!(s.fret(), 0);
        assert_eq!(s.strum_keys(), StrumKeys::none());
        assert!(!s.encoder_switch());
        assert_eq!(s.encoder_position(), 0);
        assert_eq!(s.potentiometer(), 0);
        assert_eq!(s.distance_cm(), 0);
        assert_eq!(s.imu(), ImuSample::from_counts(0, 0, 0));
        assert!(!s.is_lefty());
        assert!(!s.is_display_dirty());
    }

    #[test]
    fn test_fret_change_flush_then_same_bytes() {
        let mut s = state();
        s.update_fret(0, 0, 0x08);
        assert_eq!(s.fret(), 16);
        assert!(s.is_display_dirty());

        s.clear_display_dirty();
        assert!(!s.is_display_dirty());

        s.update_fret(0, 0, 0x08);
        assert_eq!(s.fret(), 16);
        assert!(!s.is_display_dirty());
    }

    #[test]
    fn test_strum_channel_tracks_mask() {
        let mut s = state();
        s.update_strum_keys(0x02, 0, 0);
        assert_eq!(s.strum_keys().bits(), 0x04);
        assert!(s.is_display_dirty());
        s.clear_display_dirty();
        s.update_strum_keys(0x10, 0, 0);
        assert_eq!(s.strum_keys().bits(), 0x04);
        assert!(!s.is_display_dirty());
    }

    #[test]
    fn test_encoder_switch_channel() {
        let mut s = state();
        s.update_encoder_switch(true);
        assert!(s.encoder_switch());
        assert!(s.is_display_dirty());
    }

    #[test]
    fn test_encoder_righty_tracks_raw_with_clamp() {
        let mut s = state();
        assert!(s.update_encoder_position(50));
        assert_eq!(s.encoder_position(), 50);
        assert!(s.update_encoder_position(200));
        assert_eq!(s.encoder_position(), 127);
        // Still pinned at the clamp: no stored change, no motion reported.
        assert!(!s.update_encoder_position(150));
        assert_eq!(s.encoder_position(), 127);
        assert!(s.update_encoder_position(-5));
        assert_eq!(s.encoder_position(), 0);
    }

    #[test]
    fn test_encoder_lefty_negates_deltas() {
        let mut s = state();
        s.update_encoder_position(50);
        s.set_lefty(true);
        s.clear_display_dirty();

        // Counter moving down raises the position, and vice versa.
        assert!(s.update_encoder_position(45));
        assert_eq!(s.encoder_position(), 55);
        assert!(s.update_encoder_position(55));
        assert_eq!(s.encoder_position(), 45);
        assert!(s.is_display_dirty());
    }

    #[test]
    fn test_encoder_raw_shadow_refreshes_while_saturated() {
        let mut s = state();
        s.update_encoder_position(0);
        s.set_lefty(true);

        // A big positive delta pins the position at 0...
        s.update_encoder_position(100);
        assert_eq!(s.encoder_position(), 0);
        // ...and the next delta is measured from 100, not from 0.
        s.update_encoder_position(90);
        assert_eq!(s.encoder_position(), 10);
    }

    #[test]
    fn test_encoder_extreme_counter_values_clamp() {
        let mut s = state();
        s.update_encoder_position(1);
        s.set_lefty(true);

        // A counter reading billions away just pins at an end stop.
        assert!(s.update_encoder_position(i32::MIN));
        assert_eq!(s.encoder_position(), 0);

        // Rolling over from MIN to MAX is a delta of -1, so one step up.
        assert!(s.update_encoder_position(i32::MAX));
        assert_eq!(s.encoder_position(), 1);

        // Exactly i32::MIN of negative delta saturates to the top stop.
        assert!(s.update_encoder_position(-1));
        assert_eq!(s.encoder_position(), 127);
    }

    #[test]
    fn test_pot_righty_inverted_half_scale() {
        let mut s = state();
        s.update_potentiometer(1023);
        assert_eq!(s.potentiometer(), 0);
        s.update_potentiometer(0);
        assert_eq!(s.potentiometer(), 127);
        s.update_potentiometer(512);
        assert_eq!(s.potentiometer(), 63);
    }

    #[test]
    fn test_pot_lefty_full_scale() {
        let mut s = state();
        s.set_lefty(true);
        s.update_potentiometer(1023);
        assert_eq!(s.potentiometer(), 255);
        s.update_potentiometer(512);
        assert_eq!(s.potentiometer(), 128);
        s.update_potentiometer(0);
        assert_eq!(s.potentiometer(), 0);
    }

    #[test]
    fn test_pot_clamps_oversized_readings() {
        let mut s = state();
        s.update_potentiometer(0xFFFF);
        assert_eq!(s.potentiometer(), 0);
        s.set_lefty(true);
        s.update_potentiometer(0xFFFF);
        assert_eq!(s.potentiometer(), 255);
    }

    #[test]
    fn test_distance_small_steps_accepted() {
        let mut s = state();
        s.update_distance(10);
        assert_eq!(s.distance_cm(), 10);
        s.update_distance(39);
        assert_eq!(s.distance_cm(), 39);
    }

    #[test]
    fn test_distance_repeat_sample_stays_clean() {
        let mut s = state();
        s.update_distance(15);
        s.clear_display_dirty();
        s.update_distance(15);
        assert_eq!(s.distance_cm(), 15);
        assert!(!s.is_display_dirty());
    }

    #[test]
    fn test_distance_glitch_rejected_entirely() {
        let mut s = state();
        s.update_distance(20);
        s.clear_display_dirty();

        s.update_distance(55);
        assert_eq!(s.distance_cm(), 20);
        assert!(!s.is_display_dirty());
        // Rejection leaves no trace: the next in-range step still measures
        // against the stored value.
        s.update_distance(40);
        assert_eq!(s.distance_cm(), 40);
    }

    #[test]
    fn test_distance_jump_of_exactly_threshold_rejected() {
        let mut s = state();
        s.update_distance(20);
        s.update_distance(50);
        assert_eq!(s.distance_cm(), 20);
        s.update_distance(49);
        assert_eq!(s.distance_cm(), 49);
    }

    #[test]
    fn test_imu_triplet_latches_together() {
        let mut s = state();
        s.update_imu(ImuSample { x: 1, y: 2, z: 3 });
        assert!(s.is_display_dirty());
        s.clear_display_dirty();

        s.update_imu(ImuSample { x: 1, y: 2, z: 3 });
        assert!(!s.is_display_dirty());
        s.update_imu(ImuSample { x: 1, y: 2, z: 4 });
        assert!(s.is_display_dirty());
    }

    #[test]
    fn test_lefty_is_a_display_channel() {
        let mut s = state();
        s.set_lefty(true);
        assert!(s.is_lefty());
        assert!(s.is_display_dirty());
        s.clear_display_dirty();
        s.set_lefty(true);
        assert!(!s.is_display_dirty());
    }

    #[test]
    fn test_imu_from_counts_low_byte_narrowing() {
        let sample = ImuSample::from_counts(-1, 258, 2047);
        assert_eq!(sample.x, 0xFF);
        assert_eq!(sample.y, 2);
        assert_eq!(sample.z, 0xFF);
    }

    proptest! {
        #[test]
        fn prop_pot_scaling_formulas(raw in 0u16..=1023) {
            let mut s = state();
            s.update_potentiometer(raw);
            prop_assert_eq!(s.potentiometer(), ((1023 - raw) >> 3) as u8);

            s.set_lefty(true);
            s.update_potentiometer(raw);
            prop_assert_eq!(s.potentiometer(), (raw >> 2) as u8);
        }

        #[test]
        fn prop_distance_never_jumps_threshold_or_more(samples in proptest::collection::vec(any::<u8>(), 1..40)) {
            let mut s = state();
            let threshold = SensorConfig::default().distance_anomaly_threshold;
            for sample in samples {
                let before = s.distance_cm();
                s.update_distance(sample);
                prop_assert!(s.distance_cm().abs_diff(before) < threshold);
            }
        }
    }
}
