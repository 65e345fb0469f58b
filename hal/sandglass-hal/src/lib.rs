//! Sandglass Hardware Abstraction Layer
//!
//! This crate defines the bus-level traits the peripheral drivers are
//! written against. Chip-specific HALs (currently RP2040) implement them,
//! and host tests implement them with scripted mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sandglass-firmware (polling loop)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sandglass-drivers (MPU-6050, IS31FL…)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sandglass-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ sandglass-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (encoder phases)
//! - [`i2c::I2cBus`] - I2C bus operations (motion sensor, LED matrix)
//! - [`i2c::SharedI2c`] - One bus handed to several drivers

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use i2c::{I2cBus, I2cConfig, SharedI2c};
