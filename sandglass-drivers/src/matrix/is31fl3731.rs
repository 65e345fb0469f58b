//! IS31FL3731 CharliePlex driver, 15x7 wing layout
//!
//! The IS31FL3731 drives a 16x9 charlieplexed array with 8-bit PWM per
//! LED. Registers are banked: writing a bank number to the command
//! register (0xFD) selects one of eight frame banks or the function
//! register bank (0x0B).
//!
//! The 15x7 wing wires only part of the array, folding the right half of
//! the matrix into the upper rows of the chip. [`wing_led_index`] maps
//! matrix pixels to chip LED numbers.
//!
//! Frames are always written to frame bank 0, which is also the
//! displayed picture.

use embedded_hal::delay::DelayNs;
use sandglass_core::render::{PixelBuffer, MATRIX_HEIGHT, MATRIX_WIDTH};
use sandglass_core::traits::{DisplayError, MatrixDisplay};
use sandglass_hal::I2cBus;

/// IS31FL3731 register addresses
pub mod reg {
    /// Bank select (command register)
    pub const BANK_SELECT: u8 = 0xFD;
    /// Function register bank
    pub const BANK_FUNCTION: u8 = 0x0B;
    /// Mode configuration (function bank)
    pub const CONFIG: u8 = 0x00;
    /// Displayed frame (function bank)
    pub const PICTURE_FRAME: u8 = 0x01;
    /// Audio synchronisation (function bank)
    pub const AUDIO_SYNC: u8 = 0x06;
    /// Software shutdown (function bank)
    pub const SHUTDOWN: u8 = 0x0A;
    /// First LED enable register (frame banks)
    pub const LED_CONTROL: u8 = 0x00;
    /// First PWM register (frame banks)
    pub const PWM: u8 = 0x24;
}

/// Default I2C address (AD pin to GND)
pub const DEFAULT_ADDRESS: u8 = 0x74;

/// Number of frame banks on the chip
const FRAME_COUNT: u8 = 8;

/// LED enable registers per frame (0x00..=0x11)
const LED_CONTROL_LEN: usize = 18;

/// PWM registers per frame
const PWM_LEN: usize = 144;

/// PWM bytes per bus write; keeps each transfer short
const PWM_CHUNK: usize = 24;

/// `CONFIG` value for picture mode
const PICTURE_MODE: u8 = 0x00;

/// Time held in software shutdown during bring-up
const SHUTDOWN_DELAY_MS: u32 = 10;

/// Chip LED number for a pixel on the 15x7 wing
///
/// Returns `None` outside the matrix.
pub fn wing_led_index(x: usize, y: usize) -> Option<usize> {
    if x >= MATRIX_WIDTH || y >= MATRIX_HEIGHT {
        return None;
    }

    // Right half folds onto chip rows 8+, left half is mirrored vertically
    let (x, y) = if x > 7 { (15 - x, y + 8) } else { (x, 7 - y) };
    let (x, y) = (y, x);
    Some(x + y * 16)
}

/// IS31FL3731 driving the 15x7 wing
pub struct Is31fl3731Wing<I2C> {
    i2c: I2C,
    address: u8,
    initialized: bool,
}

impl<I2C: I2cBus> Is31fl3731Wing<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            initialized: false,
        }
    }

    /// Bring the chip out of shutdown in picture mode with a blank frame
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.write_function(reg::SHUTDOWN, 0x00)?;
        delay.delay_ms(SHUTDOWN_DELAY_MS);
        self.write_function(reg::SHUTDOWN, 0x01)?;

        self.write_function(reg::CONFIG, PICTURE_MODE)?;
        self.write_function(reg::PICTURE_FRAME, 0)?;

        // Brightness is carried entirely by PWM, so every LED stays enabled
        let mut enable = [0xFFu8; LED_CONTROL_LEN + 1];
        enable[0] = reg::LED_CONTROL;
        for frame in 0..FRAME_COUNT {
            self.select_bank(frame)?;
            self.write(&enable)?;
        }

        self.write_function(reg::AUDIO_SYNC, 0)?;

        self.initialized = true;
        self.write_pwm(&[0; PWM_LEN])
    }

    /// Check if [`init`](Self::init) has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_pwm(&mut self, pwm: &[u8; PWM_LEN]) -> Result<(), DisplayError> {
        self.select_bank(0)?;

        let mut buf = [0u8; PWM_CHUNK + 1];
        for (i, chunk) in pwm.chunks(PWM_CHUNK).enumerate() {
            buf[0] = reg::PWM + (i * PWM_CHUNK) as u8;
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.write(&buf[..=chunk.len()])?;
        }
        Ok(())
    }

    fn write_function(&mut self, register: u8, value: u8) -> Result<(), DisplayError> {
        self.select_bank(reg::BANK_FUNCTION)?;
        self.write(&[register, value])
    }

    fn select_bank(&mut self, bank: u8) -> Result<(), DisplayError> {
        self.write(&[reg::BANK_SELECT, bank])
    }

    fn write(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, data)
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I2C: I2cBus> MatrixDisplay for Is31fl3731Wing<I2C> {
    fn push(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let mut pwm = [0u8; PWM_LEN];
        for (x, y, value) in frame.pixels() {
            if let Some(led) = wing_led_index(x, y) {
                pwm[led] = value;
            }
        }
        self.write_pwm(&pwm)
    }
}
