//! State shared between tasks
//!
//! The encoder task is the only writer of the position; the timer loop
//! only reads it, so plain load/store atomics are enough on the M0+.

use portable_atomic::{AtomicI32, Ordering};

use sandglass_core::traits::EncoderCounter;

/// Latest decoded encoder count
pub static ENCODER_POSITION: AtomicI32 = AtomicI32::new(0);

/// Reader side of [`ENCODER_POSITION`]
pub struct SharedEncoder;

impl EncoderCounter for SharedEncoder {
    fn position(&mut self) -> i32 {
        ENCODER_POSITION.load(Ordering::Relaxed)
    }
}
