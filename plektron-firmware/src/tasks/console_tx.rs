//! Console UART transmit task
//!
//! Sends rendered frames to whatever terminal is attached to the bench
//! UART. Each frame is a form feed followed by the screen rows, so a
//! dumb terminal repaints in place.

use defmt::*;
use embassy_rp::uart::BufferedUart;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_io_async::Write;
use heapless::Vec;

use plektron_console::{view, Screen, LINE_LEN, SCREEN_ROWS};

use crate::channels::SCREEN_UPDATE;

/// One frame: form feed plus every row with a CRLF ending
const FRAME_LEN: usize = 1 + SCREEN_ROWS * (LINE_LEN + 2);

/// Shared screen buffer protected by mutex
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Console TX task - sends frames to the attached terminal
#[embassy_executor::task]
pub async fn console_tx_task(mut uart: BufferedUart) {
    info!("Console TX task started");

    loop {
        SCREEN_UPDATE.wait().await;

        let frame = encode_frame().await;
        if let Err(e) = uart.write_all(&frame).await {
            warn!("Console write failed: {:?}", e);
        }
    }
}

/// Copy the screen into one contiguous frame, holding the lock only for
/// the copy. Capacity covers the form feed and every full row, so the
/// pushes cannot fail.
async fn encode_frame() -> Vec<u8, FRAME_LEN> {
    let mut frame = Vec::new();
    let screen = SCREEN_BUFFER.lock().await;

    let _ = frame.push(view::FRAME_CLEAR);
    for line in screen.lines() {
        let _ = frame.extend_from_slice(line.as_bytes());
        let _ = frame.extend_from_slice(b"\r\n");
    }

    frame
}
