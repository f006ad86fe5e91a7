//! Distance ranging
//!
//! An HC-SR04 ultrasonic ranger under the neck measures hand distance
//! for the pitch-bend gesture.

pub mod hcsr04;

pub use hcsr04::{echo_to_cm, Hcsr04, Hcsr04Config, PulseTimer, RangeError};
