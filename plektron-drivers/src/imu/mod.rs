//! Inertial measurement
//!
//! One MMA8452Q accelerometer rides the strum board's bus. It answers
//! two questions: which way up is the instrument (grip laterality), and
//! what are the raw counts for the bench display.

pub mod mma8452q;

pub use mma8452q::{AccelSample, GScale, Mma8452q};
