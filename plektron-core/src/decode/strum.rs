//! Strum decoder
//!
//! The strum board is the same QT2120/QT1070 assembly as the fret board,
//! but its electrodes are ganged into four strum pads. The pads straddle
//! the two controllers' electrode banks, so each pad maps to a sub-field
//! of the raw status bytes rather than a single key bit:
//!
//! - pad 0: QT1070 keys 3 and up (`ss2 >> 3`)
//! - pad 1: QT2120 keys 5-7 (`ss0` high bits) or key 8 (`ss1` bit 0)
//! - pad 2: QT2120 keys 1-4 (`ss0` bits 1-4)
//! - pad 3: QT2120 keys 10 and up (`ss1` bits 2-4) or key 0 (`ss0` bit 0)
//!
//! Unlike the fret cascade, pads are independent: any number of them can
//! be active at once.

/// Number of strum pads
pub const STRUM_KEY_COUNT: u8 = 4;

/// Pressed-state mask of the four strum pads, pad `n` in bit `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StrumKeys(u8);

impl StrumKeys {
    /// No pads pressed
    pub const fn none() -> Self {
        Self(0)
    }

    /// Build from a raw mask; bits above the four pad bits are discarded
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Raw 4-bit mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether pad `key` (0-3) is pressed; out-of-range pads read unpressed
    pub const fn is_pressed(self, key: u8) -> bool {
        key < STRUM_KEY_COUNT && ((self.0 >> key) & 1) != 0
    }

    /// Whether any pad is pressed
    pub const fn any(self) -> bool {
        self.0 != 0
    }
}

/// Decode the strum pad mask from the strum board's three status bytes.
///
/// Byte order matches the bus read order: `ss0`/`ss1` are the QT2120 key
/// status low/high bytes, `ss2` is the QT1070 status byte. Each pad bit is
/// computed from its own sub-field; no pad shadows another.
pub fn decode_strum_keys(ss0: u8, ss1: u8, ss2: u8) -> StrumKeys {
    let mut keys = 0u8;
    if (ss2 >> 3) != 0 {
        keys |= 0x01;
    }
    if ((ss0 >> 5) & 0x0F) != 0 || (ss1 & 0x01) != 0 {
        keys |= 0x02;
    }
    if ((ss0 >> 1) & 0x0F) != 0 {
        keys |= 0x04;
    }
    if ((ss1 >> 1) & 0x0E) != 0 || (ss0 & 0x01) != 0 {
        keys |= 0x08;
    }
    StrumKeys::from_bits(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_board_decodes_no_keys() {
        assert_eq!(decode_strum_keys(0, 0, 0), StrumKeys::none());
    }

    #[test]
    fn test_pad0_from_qt1070_high_keys() {
        assert_eq!(decode_strum_keys(0, 0, 0x08).bits(), 0x01);
        assert_eq!(decode_strum_keys(0, 0, 0x40).bits(), 0x01);
        // QT1070 keys 0-2 belong to no pad.
        assert_eq!(decode_strum_keys(0, 0, 0x07).bits(), 0x00);
    }

    #[test]
    fn test_pad1_from_either_controller() {
        assert_eq!(decode_strum_keys(0x20, 0, 0).bits(), 0x02);
        assert_eq!(decode_strum_keys(0x80, 0, 0).bits(), 0x02);
        assert_eq!(decode_strum_keys(0, 0x01, 0).bits(), 0x02);
    }

    #[test]
    fn test_pad2_from_qt2120_low_keys() {
        assert_eq!(decode_strum_keys(0x02, 0, 0).bits(), 0x04);
        assert_eq!(decode_strum_keys(0x10, 0, 0).bits(), 0x04);
        // Key 5 feeds pad 1, not pad 2.
        assert_eq!(decode_strum_keys(0x20, 0, 0).bits(), 0x02);
    }

    #[test]
    fn test_pad3_from_either_controller() {
        assert_eq!(decode_strum_keys(0, 0x04, 0).bits(), 0x08);
        assert_eq!(decode_strum_keys(0, 0x10, 0).bits(), 0x08);
        assert_eq!(decode_strum_keys(0x01, 0, 0).bits(), 0x08);
        // ss1 bit 1 is key 9, which belongs to no pad.
        assert_eq!(decode_strum_keys(0, 0x02, 0).bits(), 0x00);
    }

    #[test]
    fn test_pads_are_independent() {
        let keys = decode_strum_keys(0x22, 0x04, 0x08);
        assert_eq!(keys.bits(), 0x0F);
        assert!(keys.any());
        for key in 0..STRUM_KEY_COUNT {
            assert!(keys.is_pressed(key));
        }
    }

    #[test]
    fn test_is_pressed_out_of_range() {
        let keys = StrumKeys::from_bits(0x0F);
        assert!(!keys.is_pressed(4));
        assert!(!keys.is_pressed(0xFF));
    }

    #[test]
    fn test_from_bits_discards_high_bits() {
        assert_eq!(StrumKeys::from_bits(0xF5).bits(), 0x05);
    }
}
