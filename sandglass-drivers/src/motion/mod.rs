//! Motion sensor drivers

pub mod mpu6050;

pub use mpu6050::{AccelRange, FilterBandwidth, Mpu6050, Mpu6050Config};
