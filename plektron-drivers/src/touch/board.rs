//! Paired touch controllers
//!
//! Each sensor board - fret and strum alike - is one QT2120 plus one
//! QT1070 sharing a bus. The pair initializes together and reads out as
//! the three status bytes the core decoders expect. Each chip also
//! drives an active-low change line; the firmware polls those lines and
//! skips the bus read when neither is asserted.

use embedded_hal_async::i2c::I2c;

use super::{qt1070, qt2120, ChipInfo, Qt1070, Qt1070Config, Qt2120, Qt2120Config};

/// Bring-up values for both chips of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchBoardConfig {
    pub qt2120: Qt2120Config,
    pub qt1070: Qt1070Config,
}

/// Identity of both chips, for the bring-up log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardInfo {
    pub qt2120: ChipInfo,
    pub qt1070: ChipInfo,
}

impl BoardInfo {
    /// Whether both chips answered with their expected chip IDs
    pub fn identified(&self) -> bool {
        self.qt2120.chip_id == qt2120::CHIP_ID && self.qt1070.chip_id == qt1070::CHIP_ID
    }
}

/// Raw status bytes of one board, in decoder argument order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyStatus {
    /// QT2120 keys 0-7
    pub qt2120_low: u8,
    /// QT2120 keys 8-11
    pub qt2120_high: u8,
    /// QT1070 keys 0-6
    pub qt1070: u8,
}

/// One QT2120/QT1070 assembly
pub struct TouchBoard {
    qt2120: Qt2120,
    qt1070: Qt1070,
}

impl TouchBoard {
    pub const fn new() -> Self {
        Self {
            qt2120: Qt2120::new(),
            qt1070: Qt1070::new(),
        }
    }

    /// Probe both chips and write their bring-up configuration.
    ///
    /// Returns whatever the chips reported; the caller decides how loud
    /// a chip ID mismatch should be. The bench tool logs it and keeps
    /// going with whatever hardware answers.
    pub async fn init<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        config: &TouchBoardConfig,
    ) -> Result<BoardInfo, I2C::Error> {
        let qt2120 = self.qt2120.probe(i2c).await?;
        self.qt2120.init(i2c, &config.qt2120).await?;
        let qt1070 = self.qt1070.probe(i2c).await?;
        self.qt1070.init(i2c, &config.qt1070).await?;
        Ok(BoardInfo { qt2120, qt1070 })
    }

    /// Read the three status bytes
    pub async fn read_status<I2C: I2c>(&self, i2c: &mut I2C) -> Result<KeyStatus, I2C::Error> {
        let (qt2120_low, qt2120_high) = self.qt2120.key_status(i2c).await?;
        let qt1070 = self.qt1070.key_status(i2c).await?;
        Ok(KeyStatus {
            qt2120_low,
            qt2120_high,
            qt1070,
        })
    }
}

impl Default for TouchBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::FirmwareVersion;

    fn info(chip_id: u8) -> ChipInfo {
        ChipInfo {
            chip_id,
            version: FirmwareVersion::from_byte(0x10),
        }
    }

    #[test]
    fn test_identified_requires_both_ids() {
        let good = BoardInfo {
            qt2120: info(qt2120::CHIP_ID),
            qt1070: info(qt1070::CHIP_ID),
        };
        assert!(good.identified());

        let swapped = BoardInfo {
            qt2120: info(qt1070::CHIP_ID),
            qt1070: info(qt2120::CHIP_ID),
        };
        assert!(!swapped.identified());
    }
}
