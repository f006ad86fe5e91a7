//! Board-agnostic sensor fusion core for the Plektron bench firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Key-status decoders for the fret and strum boards
//! - Change-tracked values (current/previous/dirty)
//! - The canonical fused `SensorState`
//! - Tuning configuration types
//!
//! Everything here is pure and host-testable; bus traffic and pin wiggling
//! live in `plektron-drivers` and the firmware crate.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod decode;
pub mod state;
