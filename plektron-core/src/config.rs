//! Tuning configuration for the sensor fusion core
//!
//! Values that used to be scattered compile-time constants in earlier
//! prototypes live here as plain data, passed into `SensorState` at
//! construction.

/// Sensor fusion tuning values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Upper clamp for the encoder position (MIDI-style 7-bit range)
    pub encoder_max: u8,
    /// Ultrasonic anomaly threshold in cm; a sample whose absolute delta
    /// from the stored distance reaches this value is dropped as a glitch
    pub distance_anomaly_threshold: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            encoder_max: 127,
            // The ranger's echo glitches read as jumps of ~1700 us and up;
            // at 58 us/cm that is just under 30 cm.
            distance_anomaly_threshold: 30,
        }
    }
}
