//! Fret decoder
//!
//! The fret board senses 19 fret positions across two capacitive touch
//! controllers: a 12-key QT2120 (frets 1-12) and a 7-key QT1070
//! (frets 13-19). The board reports three raw key-status bytes per read:
//!
//! - `ks0`: QT2120 key status low byte, keys 0-7 -> frets 1-8
//! - `ks1`: QT2120 key status high byte, keys 8-11 -> frets 9-12
//! - `ks2`: QT1070 key status byte, keys 0-6 -> frets 13-19
//!
//! Playing a note means the highest touched fret wins, so decoding is a
//! strict priority cascade over the banks and the highest set bit within
//! the winning bank.

/// Number of fret positions on the neck
pub const FRET_COUNT: u8 = 19;

/// Defined key bits of the QT1070 status byte (7 keys; bit 7 is reserved)
const KS2_KEY_MASK: u8 = 0x7F;

/// Defined key bits of the QT2120 status high byte (keys 8-11)
const KS1_KEY_MASK: u8 = 0x0F;

/// Decode the active fret from the fret board's three status bytes.
///
/// Returns the fret number in `1..=19`, or `0` when no fret is pressed
/// (open). A nonzero `ks2` always wins over `ks1`/`ks0` regardless of
/// their contents, then a nonzero `ks1` wins over `ks0`; within the
/// winning bank the highest set key bit decides the fret. Reserved status
/// bits carry no fret, so a bank with only reserved bits set decodes as
/// open.
pub fn decode_fret(ks0: u8, ks1: u8, ks2: u8) -> u8 {
    if ks2 != 0 {
        highest_fret(ks2 & KS2_KEY_MASK, 13)
    } else if ks1 != 0 {
        highest_fret(ks1 & KS1_KEY_MASK, 9)
    } else {
        highest_fret(ks0, 1)
    }
}

/// Fret mapped to the highest set bit of `bits`, counting up from `base`;
/// `0` if no bit is set.
fn highest_fret(bits: u8, base: u8) -> u8 {
    if bits == 0 {
        0
    } else {
        base + (7 - bits.leading_zeros() as u8)
    }
}
