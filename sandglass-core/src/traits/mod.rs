//! Hardware abstraction traits
//!
//! These traits define the interface between the timer logic and the
//! peripherals on a particular board.

pub mod display;
pub mod encoder;
pub mod motion;

pub use display::{DisplayError, MatrixDisplay};
pub use encoder::EncoderCounter;
pub use motion::{MotionError, MotionSensor};
