//! AT42QT2120 12-key capacitive touch controller
//!
//! Covers what the bench needs from the chip: identity, the bring-up
//! writes the prototype boards were tuned with, and the two key-status
//! bytes. The controller auto-increments the register address on reads,
//! so both status bytes come back in one transaction.

use embedded_hal_async::i2c::I2c;

use super::{ChipInfo, FirmwareVersion};

/// Fixed I2C address
pub const ADDR: u8 = 0x1C;

/// Expected chip ID register value
pub const CHIP_ID: u8 = 0x3E;

/// Number of sense keys
pub const KEY_COUNT: u8 = 12;

/// Register addresses
pub mod reg {
    /// Chip ID (reads 0x3E)
    pub const CHIP_ID: u8 = 0;
    /// Firmware version (major nibble / minor nibble)
    pub const FIRMWARE_VERSION: u8 = 1;
    /// Detection status summary
    pub const DETECTION_STATUS: u8 = 2;
    /// Key status, keys 0-7
    pub const KEY_STATUS_LOW: u8 = 3;
    /// Key status, keys 8-11
    pub const KEY_STATUS_HIGH: u8 = 4;
    /// Detection integrator (consecutive detects to confirm a touch)
    pub const TOUCH_INTEGRATION: u8 = 11;
    /// Reference drift hold time after a touch
    pub const DRIFT_HOLD_TIME: u8 = 13;
    /// Detect threshold for key 0; one register per key follows
    pub const DETECT_THRESHOLD_0: u8 = 16;
}

/// Bring-up values written by `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Qt2120Config {
    /// Per-key detect threshold in counts above reference
    pub detect_threshold: u8,
    /// Consecutive detects before a key reports touched
    pub touch_integration: u8,
    /// Drift hold time after a touch, in 0.16 s units
    pub drift_hold_time: u8,
}

impl Default for Qt2120Config {
    fn default() -> Self {
        // Values the instrument's electrode stack was tuned with.
        Self {
            detect_threshold: 19,
            touch_integration: 4,
            drift_hold_time: 3,
        }
    }
}

/// AT42QT2120 driver. Borrows the bus per call so several devices can
/// share it from one task.
pub struct Qt2120 {
    addr: u8,
}

impl Qt2120 {
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
    pub async fn init<I2C: I2c>(&self, i2c: &mut I2C, config: &Qt2120Config) -> Result<(), I2C::Error> {
        self.write_reg(i2c, reg::TOUCH_INTEGRATION, config.touch_integration)
            .await?;
        self.write_reg(i2c, reg::DRIFT_HOLD_TIME, config.drift_hold_time)
            .await?;
        for key in 0..KEY_COUNT {
            self.write_reg(i2c, reg::DETECT_THRESHOLD_0 + key, config.detect_threshold)
                .await?;
        }
        Ok(())
    }

    /// Read both key-status bytes: (keys 0-7, keys 8-11)
    pub async fn key_status<I2C: I2c>(&self, i2c: &mut I2C) -> Result<(u8, u8), I2C::Error> {
        let mut buf = [0u8; 2];
        i2c.write_read(self.addr, &[reg::KEY_STATUS_LOW], &mut buf).await?;
        Ok((buf[0], buf[1]))
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

impl Default for Qt2120 {
    fn default() -> Self {
        Self::new()
    }
}
