//! Ultrasonic range task
//!
//! Fires the HC-SR04 on a fixed period and publishes each result. The
//! driver's echo waits are unbounded, so the whole measurement is raced
//! against a timeout here; a ranger with nothing in front of it simply
//! never answers.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};

use plektron_drivers::range::{Hcsr04, PulseTimer};

use crate::channels::DISTANCE_READING;

/// Measurement period
const MEASURE_INTERVAL_MS: u64 = 60;

/// Echo wait bound; an echo from the far end of the range lands in
/// under 4 ms, after that the module is still draining a missed ping
const ECHO_TIMEOUT_MS: u64 = 30;

/// Pulse clock over the executor's monotonic time
pub struct UptimeClock;

impl PulseTimer for UptimeClock {
    fn now_micros(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}

/// Ultrasonic range task
#[embassy_executor::task]
pub async fn range_task(mut ranger: Hcsr04<Output<'static>, Input<'static>, UptimeClock>) {
    info!("Range task started");

    let mut delay = Delay;
    let mut ticker = Ticker::every(Duration::from_millis(MEASURE_INTERVAL_MS));

    loop {
        ticker.next().await;

        let reading = match select(
            ranger.measure(&mut delay),
            Timer::after(Duration::from_millis(ECHO_TIMEOUT_MS)),
        )
        .await
        {
            Either::First(Ok(reading)) => reading,
            Either::First(Err(e)) => {
                warn!("Ranger fault: {:?}", e);
                None
            }
            // Timeout: no echo came back at all
            Either::Second(()) => None,
        };

        DISTANCE_READING.signal(reading);
    }
}
