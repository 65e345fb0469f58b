//! Matrix rendering
//!
//! Frames are computed from scratch on every pass: nothing carries from one
//! frame to the next, so the same inputs always give the same pixels.

pub mod buffer;
pub mod font;
pub mod sand;

pub use buffer::{PixelBuffer, Rotation, MATRIX_HEIGHT, MATRIX_WIDTH};
pub use font::FONT_3X5;
pub use sand::{Progress, SandRenderer};
