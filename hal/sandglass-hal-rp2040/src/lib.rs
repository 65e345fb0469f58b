//! RP2040-specific HAL for the sand timer firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `sandglass-hal` traits on top of `embassy-rp`:
//!
//! - Blocking I2C master shared by the accelerometer and matrix controller
//! - Pulled-up GPIO inputs for the encoder channels

#![no_std]

pub mod gpio;
pub mod i2c;

pub use gpio::RpInput;
pub use i2c::{I2cBusError, RpI2c};

// Re-export shared traits from sandglass-hal for convenience
pub use sandglass_hal::{I2cBus, I2cConfig, InputPin};
