//! Embassy tasks
//!
//! The encoder is sampled in its own task; everything else runs in the
//! timer loop on the main task.

pub mod encoder;
pub mod timer;

pub use encoder::encoder_task;
pub use timer::{now_ms, run_timer};
