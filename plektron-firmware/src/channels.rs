//! Inter-task communication
//!
//! Defines the static primitives shared between Embassy tasks. Uses
//! embassy-sync signals for readings that only ever matter at their
//! latest value, and an atomic for the encoder count.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicI32;

/// Signal that the screen buffer holds a fresh frame for the console
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest ranger reading (updated by the range task)
/// `Some(cm)` for an echo inside the gesture range, `None` for no echo
pub static DISTANCE_READING: Signal<CriticalSectionRawMutex, Option<u8>> = Signal::new();

/// Running encoder detent count (updated by the encoder task)
///
/// The sampler folds this into the sensor state at its own pace; the
/// left-handed delta inversion happens there, not here.
pub static ENCODER_COUNT: AtomicI32 = AtomicI32::new(0);
