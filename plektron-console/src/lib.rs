//! Bench console rendering for the Plektron firmware
//!
//! A fixed-size text screen buffer plus the boxed bench view that shows
//! every sensor channel at a glance. Rendering is pure string building,
//! so the whole layout tests on the host; the firmware only ships the
//! finished rows over UART.

#![no_std]
#![deny(unsafe_code)]

pub mod screen;
pub mod view;

pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
pub use view::render;
