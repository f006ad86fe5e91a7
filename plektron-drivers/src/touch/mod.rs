//! AT42QT capacitive touch controllers
//!
//! Both sensor boards pair a 12-key QT2120 with a 7-key QT1070 on one
//! I2C bus. The chip drivers live in [`qt2120`] and [`qt1070`];
//! [`board`] composes a pair into one init/read unit.

pub mod board;
pub mod qt1070;
pub mod qt2120;

pub use board::{BoardInfo, KeyStatus, TouchBoard, TouchBoardConfig};
pub use qt1070::{Qt1070, Qt1070Config};
pub use qt2120::{Qt2120, Qt2120Config};

/// Firmware version as packed into either controller's version register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    /// Split the version byte: major in the high nibble, minor in the low
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            major: byte >> 4,
            minor: byte & 0x0F,
        }
    }
}

/// Identity read back from a controller at probe time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Chip ID register contents
    pub chip_id: u8,
    /// Reported firmware version
    pub version: FirmwareVersion,
}
