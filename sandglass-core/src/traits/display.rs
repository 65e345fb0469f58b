//! Display driver trait for the LED matrix

use crate::render::PixelBuffer;

/// Errors that can occur driving the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus,
    /// Frame pushed before the controller was initialized
    NotInitialized,
}

/// Trait for the matrix display
///
/// The display is a dumb sink: every frame is complete, and the driver
/// simply copies it to the hardware.
pub trait MatrixDisplay {
    /// Show a frame
    fn push(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError>;

    /// Turn every pixel off
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.push(&PixelBuffer::new())
    }
}
