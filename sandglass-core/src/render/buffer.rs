//! Pixel buffer for the LED matrix

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Gray8, GrayColor},
    Pixel,
};

/// Matrix width in pixels
pub const MATRIX_WIDTH: usize = 15;

/// Matrix height in pixels
pub const MATRIX_HEIGHT: usize = 7;

/// Display rotation
///
/// The matrix is turned over with the device, so content drawn for an
/// upside-down device is rotated half a turn before it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Normal,
    /// Rotated 180 degrees
    Inverted,
}

impl Rotation {
    /// Rotation that keeps content readable for the given attitude
    pub fn for_facing_up(facing_up: bool) -> Self {
        if facing_up {
            Rotation::Normal
        } else {
            Rotation::Inverted
        }
    }
}

/// One intensity value per LED, row-major
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: [[u8; MATRIX_WIDTH]; MATRIX_HEIGHT],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    /// Create a dark buffer
    pub const fn new() -> Self {
        Self::filled(0)
    }

    /// Create a buffer with every pixel at `value`
    pub const fn filled(value: u8) -> Self {
        Self {
            pixels: [[value; MATRIX_WIDTH]; MATRIX_HEIGHT],
        }
    }

    /// Set one pixel; coordinates outside the matrix are ignored
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = value;
        }
    }

    /// Read one pixel
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Every pixel with its coordinates, row by row
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &v)| (x, y, v)))
    }

    /// Check whether every pixel is off
    pub fn is_dark(&self) -> bool {
        self.pixels().all(|(_, _, v)| v == 0)
    }

    /// Apply a display rotation in place
    pub fn rotate(&mut self, rotation: Rotation) {
        if rotation == Rotation::Inverted {
            self.pixels.reverse();
            for row in &mut self.pixels {
                row.reverse();
            }
        }
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(MATRIX_WIDTH as u32, MATRIX_HEIGHT as u32)
    }
}

/// Gray levels are written straight through as LED intensities
impl DrawTarget for PixelBuffer {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                self.set(x, y, color.luma());
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PixelBuffer[\n")?;
        for row in &self.pixels {
            for &v in row {
                f.write_str(if v == 0 { "." } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PixelBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PixelBuffer[");
        for (i, row) in self.pixels.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, " ");
            }
            defmt::write!(f, "{=[u8]}", row.as_slice());
        }
        defmt::write!(f, "]");
    }
}
