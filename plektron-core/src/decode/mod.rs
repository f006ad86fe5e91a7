//! Key-status decoders for the touch boards
//!
//! Each board is a QT2120/QT1070 pair and reports three raw status bytes.
//! The decoders turn those bytes into the values the rest of the firmware
//! reasons about: a single fret number and a strum key mask.

pub mod fret;
pub mod strum;

pub use fret::{decode_fret, FRET_COUNT};
pub use strum::{decode_strum_keys, StrumKeys, STRUM_KEY_COUNT};
