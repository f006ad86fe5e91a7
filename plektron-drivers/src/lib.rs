//! Hardware drivers for the Plektron sensor bench
//!
//! This crate covers every sensor on the instrument:
//!
//! - AT42QT touch controllers and the paired fret/strum boards
//! - MMA8452Q accelerometer (orientation + display counts)
//! - HC-SR04 ultrasonic ranger (pitch-bend distance)
//! - Quadrature decoding for the rotary encoder
//!
//! Buses and pins stay behind `embedded-hal` / `embedded-hal-async`
//! traits, borrowed per call where devices share a bus, so the pure parts
//! of every driver test on the host. Drivers do not log; they hand typed
//! results to the firmware, which decides what is worth saying.

#![no_std]
#![deny(unsafe_code)]

pub mod imu;
pub mod input;
pub mod range;
pub mod touch;
