//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sandglass-core for the timer's peripherals:
//!
//! - Motion sensor (MPU-6050 accelerometer)
//! - LED matrix (IS31FL3731 on the 15x7 CharliePlex wing)
//! - Rotary encoder (polled quadrature decoder)
//!
//! Bus drivers are written against `sandglass_hal::I2cBus` and
//! `sandglass_hal::InputPin`, so they run unchanged against the mocks in
//! the tests below each module.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod encoder;
pub mod matrix;
pub mod motion;

#[cfg(test)]
pub(crate) mod mock;
