//! Plektron - Sensor Bench Firmware
//!
//! Main firmware binary for RP2040-based instrument prototype boards.
//! Brings up every sensor on the neck and body, then streams a live
//! status console over UART so the hardware can be exercised long
//! before any synth firmware exists.
//!
//! Named after the Greek "plektron", the pick used to strum a lyre.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, I2C1, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use plektron_core::config::SensorConfig;
use plektron_drivers::imu::{mma8452q, GScale, Mma8452q};
use plektron_drivers::range::{Hcsr04, Hcsr04Config};
use plektron_drivers::touch::{BoardInfo, TouchBoard, TouchBoardConfig};

use crate::tasks::{SamplerIo, TouchInts, UptimeClock};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Console UART buffers; TX holds one full rendered frame
static TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    info!("Plektron sensor bench starting");

    // Console UART: GP16 TX at 115200, output only
    let uart_config = UartConfig::default(); // 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 1024]);
    let rx_buf = RX_BUF.init([0u8; 16]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_16, p.PIN_17, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    info!("Console UART initialized");

    // Fret board bus: I2C0 at 400 kHz (SDA GP4, SCL GP5)
    let mut fret_i2c_config = i2c::Config::default();
    fret_i2c_config.frequency = 400_000;
    let mut fret_i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, fret_i2c_config);

    // Strum board and accelerometer bus: I2C1 at 400 kHz (SDA GP2, SCL GP3)
    let mut strum_i2c_config = i2c::Config::default();
    strum_i2c_config.frequency = 400_000;
    let mut strum_i2c = I2c::new_async(p.I2C1, p.PIN_3, p.PIN_2, Irqs, strum_i2c_config);

    // Touch boards: probe, configure, log what answered. A bench tool
    // comes up with whatever subset of the hardware responds.
    let board_config = TouchBoardConfig::default();

    let fret_board = TouchBoard::new();
    match fret_board.init(&mut fret_i2c, &board_config).await {
        Ok(found) => log_board("fret", &found),
        Err(_) => warn!("Fret board not responding"),
    }

    let strum_board = TouchBoard::new();
    match strum_board.init(&mut strum_i2c, &board_config).await {
        Ok(found) => log_board("strum", &found),
        Err(_) => warn!("Strum board not responding"),
    }

    // Accelerometer on the strum bus
    let imu = Mma8452q::new();
    match imu.probe(&mut strum_i2c).await {
        Ok(mma8452q::DEVICE_ID) => info!("MMA8452Q identified"),
        Ok(id) => warn!(
            "Accelerometer WHO_AM_I 0x{:02x}, expected 0x{:02x}",
            id,
            mma8452q::DEVICE_ID
        ),
        Err(_) => warn!("Accelerometer not responding"),
    }
    if imu.init(&mut strum_i2c, GScale::G2).await.is_err() {
        warn!("Accelerometer init failed");
    }

    // Ultrasonic ranger: trigger GP10, echo GP11
    let trigger = Output::new(p.PIN_10, Level::Low);
    let echo = Input::new(p.PIN_11, Pull::None);
    let ranger = Hcsr04::new(trigger, echo, UptimeClock, Hcsr04Config::default());

    // Potentiometer on ADC0 (GP26)
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let pot_channel = adc::Channel::new_pin(p.PIN_26, Pull::None);

    info!("ADC and ranger initialized");

    // Change lines and the encoder switch are all active low
    let io = SamplerIo {
        fret_i2c,
        strum_i2c,
        fret_board,
        strum_board,
        fret_ints: TouchInts {
            qt2120: Input::new(p.PIN_15, Pull::Up),
            qt1070: Input::new(p.PIN_14, Pull::Up),
        },
        strum_ints: TouchInts {
            qt2120: Input::new(p.PIN_1, Pull::Up),
            qt1070: Input::new(p.PIN_0, Pull::Up),
        },
        switch_pin: Input::new(p.PIN_8, Pull::Up),
        adc,
        pot_channel,
        imu,
    };

    // Spawn tasks
    spawner
        .spawn(tasks::sampler_task(io, SensorConfig::default()))
        .unwrap();
    spawner
        .spawn(tasks::encoder_task(
            Input::new(p.PIN_6, Pull::Up),
            Input::new(p.PIN_7, Pull::Up),
        ))
        .unwrap();
    spawner.spawn(tasks::range_task(ranger)).unwrap();
    spawner.spawn(tasks::console_tx_task(uart)).unwrap();

    info!("All tasks spawned, bench running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Log one board's probe result
fn log_board(name: &str, found: &BoardInfo) {
    if found.identified() {
        info!(
            "{} board: QT2120 fw {}.{}, QT1070 fw {}.{}",
            name,
            found.qt2120.version.major,
            found.qt2120.version.minor,
            found.qt1070.version.major,
            found.qt1070.version.minor
        );
    } else {
        warn!(
            "{} board: unexpected chip IDs 0x{:02x}/0x{:02x}",
            name, found.qt2120.chip_id, found.qt1070.chip_id
        );
    }
}
