//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod console_tx;
pub mod encoder;
pub mod range;
pub mod sampler;

pub use console_tx::console_tx_task;
pub use encoder::encoder_task;
pub use range::{range_task, UptimeClock};
pub use sampler::{sampler_task, SamplerIo, TouchInts};
