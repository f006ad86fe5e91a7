//! AT42QT1070 7-key capacitive touch controller
//!
//! The smaller sibling of the QT2120, covering the top frets and the
//! outer strum electrodes. Same register conventions: identity in
//! registers 0/1, key status in register 3, per-key tuning in banks.

use embedded_hal_async::i2c::I2c;

use super::{ChipInfo, FirmwareVersion};

/// Fixed I2C address
pub const ADDR: u8 = 0x1B;

/// Expected chip ID register value
pub const CHIP_ID: u8 = 0x2E;

/// Number of sense keys
pub const KEY_COUNT: u8 = 7;

/// Register addresses
pub mod reg {
    /// Chip ID (reads 0x2E)
    pub const CHIP_ID: u8 = 0;
    /// Firmware version (major nibble / minor nibble)
    pub const FIRMWARE_VERSION: u8 = 1;
    /// Detection status summary
    pub const DETECTION_STATUS: u8 = 2;
    /// Key status, keys 0-6
    pub const KEY_STATUS: u8 = 3;
    /// AVE/AKS for key 0; one register per key follows
    pub const AVE_AKS_0: u8 = 39;
    /// Detection integrator for key 0; one register per key follows
    pub const INTEGRATION_0: u8 = 46;
    /// Sample interval in 8 ms steps
    pub const LOW_POWER_MODE: u8 = 54;
}

/// Bring-up values written by `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Qt1070Config {
    /// Consecutive detects before a key reports touched
    pub touch_integration: u8,
    /// AVE/AKS byte for every key: averaging factor + suppression group
    pub ave_aks: u8,
    /// Sample interval in 8 ms steps (1 = fastest useful)
    pub low_power_mode: u8,
}

impl Default for Qt1070Config {
    fn default() -> Self {
        // 0x20 = averaging factor 8, AKS group 0 (no suppression); the
        // pads are far enough apart that AKS only loses chords.
        Self {
            touch_integration: 4,
            ave_aks: 0x20,
            low_power_mode: 1,
        }
    }
}

/// AT42QT1070 driver. Borrows the bus per call, like [`super::Qt2120`].
pub struct Qt1070 {
    addr: u8,
}

impl Qt1070 {
    /// Driver at the controller's fixed address
    pub const fn new() -> Self {
        Self { addr: ADDR }
    }

    /// Read the chip ID and firmware version
    pub async fn probe<I2C: I2c>(&self, i2c: &mut I2C) -> Result<ChipInfo, I2C::Error> {
        let chip_id = self.read_reg(i2c, reg::CHIP_ID).await?;
        let version = self.read_reg(i2c, reg::FIRMWARE_VERSION).await?;
        Ok(ChipInfo {
            chip_id,
            version: FirmwareVersion::from_byte(version),
        })
    }

    /// Write the bring-up configuration
    pub async fn init<I2C: I2c>(&self, i2c: &mut I2C, config: &Qt1070Config) -> Result<(), I2C::Error> {
        for key in 0..KEY_COUNT {
            self.write_reg(i2c, reg::INTEGRATION_0 + key, config.touch_integration)
                .await?;
        }
        for key in 0..KEY_COUNT {
            self.write_reg(i2c, reg::AVE_AKS_0 + key, config.ave_aks).await?;
        }
        self.write_reg(i2c, reg::LOW_POWER_MODE, config.low_power_mode).await
    }

    /// Read the key-status byte (keys 0-6)
    pub async fn key_status<I2C: I2c>(&self, i2c: &mut I2C) -> Result<u8, I2C::Error> {
        self.read_reg(i2c, reg::KEY_STATUS).await
    }

    async fn read_reg<I2C: I2c>(&self, i2c: &mut I2C, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        i2c.write_read(self.addr, &[reg], &mut buf).await?;
        Ok(buf[0])
    }

    async fn write_reg<I2C: I2c>(&self, i2c: &mut I2C, reg: u8, value: u8) -> Result<(), I2C::Error> {
        i2c.write(self.addr, &[reg, value]).await
    }
}

impl Default for Qt1070 {
    fn default() -> Self {
        Self::new()
    }
}
