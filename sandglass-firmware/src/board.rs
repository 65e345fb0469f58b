//! Board wiring
//!
//! The accelerometer and the matrix controller share I2C0 on GPIO4 (SDA)
//! and GPIO5 (SCL). The encoder phases are on GPIO14 (A) and GPIO13 (B),
//! switching to ground against the internal pull-ups.

use embassy_rp::peripherals::I2C0;
use embassy_rp::Peripherals;

use sandglass_hal::I2cConfig;
use sandglass_hal_rp2040::{RpI2c, RpInput};

/// Both I2C devices are rated for fast mode
pub const I2C_CONFIG: I2cConfig = I2cConfig::FAST;

/// Peripherals the timer uses, claimed from the chip
pub struct Board {
    pub i2c: RpI2c<'static, I2C0>,
    pub encoder_a: RpInput<'static>,
    pub encoder_b: RpInput<'static>,
}

impl Board {
    /// Claim and configure the timer's pins
    pub fn new(p: Peripherals) -> Self {
        Self {
            i2c: RpI2c::new(p.I2C0, p.PIN_5, p.PIN_4, I2C_CONFIG),
            encoder_a: RpInput::pulled_up(p.PIN_14),
            encoder_b: RpInput::pulled_up(p.PIN_13),
        }
    }
}
