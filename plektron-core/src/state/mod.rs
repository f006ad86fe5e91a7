//! Change-tracked sensor state
//!
//! The bench UI redraws only when a displayed value actually changed, so
//! every channel runs through a [`Tracked`] cell and the fused
//! [`SensorState`] exposes one aggregate display-dirty predicate.

pub mod sensors;
pub mod tracked;

pub use sensors::{ImuSample, SensorState};
pub use tracked::Tracked;
