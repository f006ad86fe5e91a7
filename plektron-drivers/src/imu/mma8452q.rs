//! MMA8452Q 3-axis accelerometer
//!
//! The instrument needs coarse orientation and display counts, nothing
//! fancier, so the driver stays in normal mode at a fixed full-scale
//! range and polls OUT_X_MSB bursts.

use embedded_hal_async::i2c::I2c;

use plektron_core::state::ImuSample;

/// Fixed I2C address (SA0 tied high)
pub const ADDR: u8 = 0x1D;

/// Expected WHO_AM_I register value
pub const DEVICE_ID: u8 = 0x2A;

/// Register addresses
pub mod reg {
    /// Data status
    pub const STATUS: u8 = 0x00;
    /// First output register; X/Y/Z MSB/LSB pairs follow
    pub const OUT_X_MSB: u8 = 0x01;
    /// Device identity (reads 0x2A)
    pub const WHO_AM_I: u8 = 0x0D;
    /// Full-scale range selection
    pub const XYZ_DATA_CFG: u8 = 0x0E;
    /// System control 1 (active bit, data rate)
    pub const CTRL_REG1: u8 = 0x2A;
}

/// CTRL_REG1 active-mode bit
const CTRL_ACTIVE: u8 = 0x01;

/// Full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GScale {
    /// +/- 2 g
    #[default]
    G2,
    /// +/- 4 g
    G4,
    /// +/- 8 g
    G8,
}

impl GScale {
    const fn cfg_bits(self) -> u8 {
        match self {
            GScale::G2 => 0,
            GScale::G4 => 1,
            GScale::G8 => 2,
        }
    }
}

/// One reading, signed 12-bit counts per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    /// Unpack an OUT_X_MSB burst; each axis is a left-justified 12-bit
    /// sample in its MSB/LSB pair
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: axis(bytes[0], bytes[1]),
            y: axis(bytes[2], bytes[3]),
            z: axis(bytes[4], bytes[5]),
        }
    }

    /// Left-handed grip: gravity pulls the X axis negative when the
    /// instrument is flipped over
    pub fn lefty_flipped(&self) -> bool {
        self.x < 0
    }

    /// Narrow to the display bytes the fused state latches
    pub fn display_sample(&self) -> ImuSample {
        ImuSample::from_counts(self.x, self.y, self.z)
    }
}

fn axis(msb: u8, lsb: u8) -> i16 {
    ((((msb as u16) << 8) | lsb as u16) as i16) >> 4
}

/// MMA8452Q driver. Borrows the bus per call; it shares the strum
/// board's bus.
pub struct Mma8452q {
    addr: u8,
}

impl Mma8452q {
    /// Driver at the chip's fixed address
    pub const fn new() -> Self {
        Self { addr: ADDR }
    }

    /// Read WHO_AM_I
    pub async fn probe<I2C: I2c>(&self, i2c: &mut I2C) -> Result<u8, I2C::Error> {
        self.read_reg(i2c, reg::WHO_AM_I).await
    }

    /// Select the full-scale range and enter active mode.
    ///
    /// XYZ_DATA_CFG only accepts writes in standby, so init drops out of
    /// active mode first and restores it last.
    pub async fn init<I2C: I2c>(&self, i2c: &mut I2C, scale: GScale) -> Result<(), I2C::Error> {
        let ctrl = self.read_reg(i2c, reg::CTRL_REG1).await?;
        self.write_reg(i2c, reg::CTRL_REG1, ctrl & !CTRL_ACTIVE).await?;
        self.write_reg(i2c, reg::XYZ_DATA_CFG, scale.cfg_bits()).await?;
        let ctrl = self.read_reg(i2c, reg::CTRL_REG1).await?;
        self.write_reg(i2c, reg::CTRL_REG1, ctrl | CTRL_ACTIVE).await
    }

    /// Burst-read one sample
    pub async fn read_accel<I2C: I2c>(&self, i2c: &mut I2C) -> Result<AccelSample, I2C::Error> {
        let mut buf = [0u8; 6];
        i2c.write_read(self.addr, &[reg::OUT_X_MSB], &mut buf).await?;
        Ok(AccelSample::from_bytes(buf))
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

impl Default for Mma8452q {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_conversion_positive() {
        let sample = AccelSample::from_bytes([0x12, 0x34, 0x00, 0x10, 0x7F, 0xF0]);
        assert_eq!(sample.x, 0x123);
        assert_eq!(sample.y, 0x001);
        assert_eq!(sample.z, 0x7FF);
    }

    #[test]
    fn test_sample_conversion_negative() {
        let sample = AccelSample::from_bytes([0xFF, 0xF0, 0x80, 0x00, 0xFF, 0x00]);
        assert_eq!(sample.x, -1);
        assert_eq!(sample.y, -2048);
        assert_eq!(sample.z, -16);
    }

    #[test]
    fn test_lefty_follows_x_sign() {
        assert!(AccelSample { x: -1, y: 0, z: 0 }.lefty_flipped());
        assert!(!AccelSample { x: 0, y: -5, z: -5 }.lefty_flipped());
        assert!(!AccelSample { x: 100, y: 0, z: 0 }.lefty_flipped());
    }

    #[test]
    fn test_display_sample_narrows_to_low_bytes() {
        let sample = AccelSample { x: -1, y: 258, z: 100 };
        let display = sample.display_sample();
        assert_eq!(display.x, 0xFF);
        assert_eq!(display.y, 2);
        assert_eq!(display.z, 100);
    }
}
