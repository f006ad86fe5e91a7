//! Encoder polling task
//!
//! Polls the quadrature pins fast enough to catch every transition of a
//! hand-turned detent encoder and accumulates detents into the shared
//! counter.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use plektron_drivers::input::QuadratureDecoder;

use crate::channels::ENCODER_COUNT;

/// Poll interval; a spun detent encoder stays well under 500 Hz
const POLL_INTERVAL_MS: u64 = 1;

/// Encoder polling task
#[embassy_executor::task]
pub async fn encoder_task(pin_a: Input<'static>, pin_b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new();
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(direction) = decoder.update(pin_a.is_high(), pin_b.is_high()) {
            ENCODER_COUNT.fetch_add(direction.delta(), Ordering::Relaxed);
        }
    }
}
