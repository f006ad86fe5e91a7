//! HC-SR04 ultrasonic ranger
//!
//! A 10 us pulse on the trigger pin fires a ping; the echo pin then goes
//! high for the round-trip flight time, 58 us per cm of target distance.
//! The pitch-bend gesture lives in the first 60 cm, so anything beyond
//! that reports out-of-range rather than a distance.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;

/// Round-trip echo time per cm of target distance
pub const US_PER_CM: u64 = 58;

/// Microsecond clock for timing the echo pulse
///
/// Implemented over the executor clock on hardware; tests use a scripted
/// counter.
pub trait PulseTimer {
    /// Monotonic microseconds
    fn now_micros(&mut self) -> u64;
}

/// Ranger limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hcsr04Config {
    /// Echoes landing beyond this distance report out-of-range
    pub max_range_cm: u8,
}

impl Default for Hcsr04Config {
    fn default() -> Self {
        // The pitch-bend gesture ends about 60 cm off the body.
        Self { max_range_cm: 60 }
    }
}

/// Ranger fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Trigger pin refused to drive
    Trigger,
    /// Echo pin wait failed
    Echo,
}

/// Round-trip echo time to target distance, truncating
pub fn echo_to_cm(us: u64) -> u16 {
    u16::try_from(us / US_PER_CM).unwrap_or(u16::MAX)
}

/// HC-SR04 driver owning its trigger/echo pins and pulse clock
pub struct Hcsr04<TRIG, ECHO, CLK> {
    trigger: TRIG,
    echo: ECHO,
    clock: CLK,
    config: Hcsr04Config,
}

impl<TRIG, ECHO, CLK> Hcsr04<TRIG, ECHO, CLK>
where
    TRIG: OutputPin,
    ECHO: Wait,
    CLK: PulseTimer,
{
    pub fn new(trigger: TRIG, echo: ECHO, clock: CLK, config: Hcsr04Config) -> Self {
        Self {
            trigger,
            echo,
            clock,
            config,
        }
    }

    /// Fire one measurement.
    ///
    /// Returns `Ok(None)` when the echo lands beyond the configured
    /// range. The echo waits themselves are unbounded; callers bound the
    /// whole call with their executor's timeout and read a timeout as no
    /// echo at all.
    pub async fn measure<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<u8>, RangeError> {
        self.trigger.set_high().map_err(|_| RangeError::Trigger)?;
        delay.delay_us(10).await;
        self.trigger.set_low().map_err(|_| RangeError::Trigger)?;

        self.echo.wait_for_high().await.map_err(|_| RangeError::Echo)?;
        let start = self.clock.now_micros();
        self.echo.wait_for_low().await.map_err(|_| RangeError::Echo)?;
        let elapsed = self.clock.now_micros().saturating_sub(start);

        let cm = echo_to_cm(elapsed);
        if cm > self.config.max_range_cm as u16 {
            return Ok(None);
        }
        Ok(Some(cm as u8))
    }
}
