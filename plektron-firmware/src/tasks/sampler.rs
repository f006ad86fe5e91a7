//! Sensor sampling task
//!
//! Owns the sensor state and every input except the encoder detents and
//! the ranger, which run in their own tasks and hand readings over
//! through `channels`. Runs on a 10 ms tick; the touch boards are only
//! read when one of their change lines is asserted.

use defmt::*;
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, I2C1};
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use plektron_console::view;
use plektron_core::config::SensorConfig;
use plektron_core::state::SensorState;
use plektron_drivers::imu::Mma8452q;
use plektron_drivers::touch::TouchBoard;

use crate::channels::{DISTANCE_READING, ENCODER_COUNT, SCREEN_UPDATE};
use crate::tasks::console_tx::SCREEN_BUFFER;

/// Sampling interval
const SAMPLE_INTERVAL_MS: u64 = 10;

/// Change lines of one touch board, active low
pub struct TouchInts {
    pub qt2120: Input<'static>,
    pub qt1070: Input<'static>,
}

impl TouchInts {
    /// Whether either chip is flagging unread key state
    pub fn pending(&self) -> bool {
        self.qt2120.is_low() || self.qt1070.is_low()
    }
}

/// Everything the sampler owns: both buses, the boards and IMU on them,
/// the change lines, the encoder switch, and the pot ADC.
pub struct SamplerIo {
    pub fret_i2c: I2c<'static, I2C0, i2c::Async>,
    pub strum_i2c: I2c<'static, I2C1, i2c::Async>,
    pub fret_board: TouchBoard,
    pub strum_board: TouchBoard,
    pub fret_ints: TouchInts,
    pub strum_ints: TouchInts,
    pub switch_pin: Input<'static>,
    pub adc: Adc<'static, adc::Async>,
    pub pot_channel: adc::Channel<'static>,
    pub imu: Mma8452q,
}

/// Sensor sampling task
#[embassy_executor::task]
pub async fn sampler_task(io: SamplerIo, config: SensorConfig) {
    info!("Sampler task started");

    let SamplerIo {
        mut fret_i2c,
        mut strum_i2c,
        fret_board,
        strum_board,
        fret_ints,
        strum_ints,
        switch_pin,
        mut adc,
        mut pot_channel,
        imu,
    } = io;

    let mut state = SensorState::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));

    loop {
        ticker.next().await;

        // Touch boards, gated on their change lines
        if fret_ints.pending() {
            match fret_board.read_status(&mut fret_i2c).await {
                Ok(keys) => state.update_fret(keys.qt2120_low, keys.qt2120_high, keys.qt1070),
                Err(_) => warn!("Fret board read failed"),
            }
        }
        if strum_ints.pending() {
            match strum_board.read_status(&mut strum_i2c).await {
                Ok(keys) => {
                    state.update_strum_keys(keys.qt2120_low, keys.qt2120_high, keys.qt1070)
                }
                Err(_) => warn!("Strum board read failed"),
            }
        }

        // Encoder switch, active low
        state.update_encoder_switch(switch_pin.is_low());

        // Detent count accumulated by the encoder task
        state.update_encoder_position(ENCODER_COUNT.load(Ordering::Relaxed));

        // Potentiometer: 12-bit ADC narrowed to the 10 bits the scaling expects
        match adc.read(&mut pot_channel).await {
            Ok(raw) => state.update_potentiometer(raw >> 2),
            Err(_) => warn!("Pot ADC read failed"),
        }

        // Accelerometer: orientation first, then the display triplet
        match imu.read_accel(&mut strum_i2c).await {
            Ok(sample) => {
                state.set_lefty(sample.lefty_flipped());
                state.update_imu(sample.display_sample());
            }
            Err(_) => warn!("Accelerometer read failed"),
        }

        // Latest ranger reading; out-of-range reports leave the display alone
        if let Some(Some(cm)) = DISTANCE_READING.try_take() {
            state.update_distance(cm);
        }

        // Push a frame when anything the console shows has changed
        if state.is_display_dirty() {
            {
                let mut screen = SCREEN_BUFFER.lock().await;
                view::render(&state, &mut screen);
            }
            SCREEN_UPDATE.signal(());
            state.clear_display_dirty();
        }
    }
}
