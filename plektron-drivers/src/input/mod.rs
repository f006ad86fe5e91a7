//! Operator input
//!
//! The rotary encoder below the strum pads; its push switch reads as a
//! plain pin in the firmware.

pub mod quadrature;

pub use quadrature::{Direction, QuadratureDecoder};
