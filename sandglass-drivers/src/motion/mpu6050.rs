//! MPU-6050 accelerometer (I2C)
//!
//! Only the accelerometer half of the chip is used. The gyro is left at
//! its power-on configuration.
//!
//! # Bring-up
//!
//! 1. Check `WHO_AM_I` reads 0x68
//! 2. Device reset, then signal path reset
//! 3. Sample rate divider, low-pass filter and full-scale range
//! 4. Wake with the X gyro PLL as clock source
//!
//! Samples are read as one 6-byte burst from `ACCEL_XOUT_H` (big-endian
//! x, y, z) and scaled to m/s².

use embedded_hal::delay::DelayNs;
use sandglass_core::sensing::AccelSample;
use sandglass_core::traits::{MotionError, MotionSensor};
use sandglass_hal::I2cBus;

/// MPU-6050 register addresses
pub mod reg {
    /// Sample rate divider
    pub const SMPLRT_DIV: u8 = 0x19;
    /// Digital low-pass filter
    pub const CONFIG: u8 = 0x1A;
    /// Accelerometer full-scale range
    pub const ACCEL_CONFIG: u8 = 0x1C;
    /// First of six accelerometer output registers
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// Signal path reset
    pub const SIGNAL_PATH_RESET: u8 = 0x68;
    /// Power management 1
    pub const PWR_MGMT_1: u8 = 0x6B;
    /// Device identity
    pub const WHO_AM_I: u8 = 0x75;
}

/// Default I2C address (AD0 low)
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Value of `WHO_AM_I` on a genuine part
const DEVICE_ID: u8 = 0x68;

/// `PWR_MGMT_1` device reset bit
const DEVICE_RESET: u8 = 0x80;

/// `PWR_MGMT_1` clock select: PLL with X gyro reference
const CLOCK_PLL_XGYRO: u8 = 0x01;

/// Reset gyro, accel and temperature signal paths
const RESET_ALL_PATHS: u8 = 0x07;

/// Settling time after each reset step
const RESET_DELAY_MS: u32 = 100;

/// Standard gravity in m/s²
const STANDARD_GRAVITY: f32 = 9.80665;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    #[default]
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// `AFS_SEL` bits for `ACCEL_CONFIG`
    pub fn config_bits(self) -> u8 {
        let afs_sel = match self {
            AccelRange::G2 => 0,
            AccelRange::G4 => 1,
            AccelRange::G8 => 2,
            AccelRange::G16 => 3,
        };
        afs_sel << 3
    }

    /// Sensitivity in LSB per g
    pub fn lsb_per_g(self) -> f32 {
        match self {
            AccelRange::G2 => 16384.0,
            AccelRange::G4 => 8192.0,
            AccelRange::G8 => 4096.0,
            AccelRange::G16 => 2048.0,
        }
    }
}

/// Digital low-pass filter bandwidth (accelerometer side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterBandwidth {
    Hz260,
    Hz184,
    Hz94,
    Hz44,
    #[default]
    Hz21,
    Hz10,
    Hz5,
}

impl FilterBandwidth {
    /// `DLPF_CFG` bits for `CONFIG`
    pub fn config_bits(self) -> u8 {
        match self {
            FilterBandwidth::Hz260 => 0,
            FilterBandwidth::Hz184 => 1,
            FilterBandwidth::Hz94 => 2,
            FilterBandwidth::Hz44 => 3,
            FilterBandwidth::Hz21 => 4,
            FilterBandwidth::Hz10 => 5,
            FilterBandwidth::Hz5 => 6,
        }
    }
}

/// MPU-6050 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu6050Config {
    /// 7-bit I2C address
    pub address: u8,
    /// Full-scale range
    pub range: AccelRange,
    /// Low-pass filter
    pub bandwidth: FilterBandwidth,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            range: AccelRange::G8,
            bandwidth: FilterBandwidth::Hz21,
        }
    }
}

/// MPU-6050 accelerometer
pub struct Mpu6050<I2C> {
    i2c: I2C,
    config: Mpu6050Config,
}

impl<I2C: I2cBus> Mpu6050<I2C> {
    /// Create a driver; call [`init`](Self::init) before reading
    pub fn new(i2c: I2C, config: Mpu6050Config) -> Self {
        Self { i2c, config }
    }

    /// Verify the device and configure it for sampling
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), MotionError> {
        let id = self.read_register(reg::WHO_AM_I)?;
        if id != DEVICE_ID {
            return Err(MotionError::WrongDevice { id });
        }

        self.write_register(reg::PWR_MGMT_1, DEVICE_RESET)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.write_register(reg::SIGNAL_PATH_RESET, RESET_ALL_PATHS)?;
        delay.delay_ms(RESET_DELAY_MS);

        self.write_register(reg::SMPLRT_DIV, 0)?;
        self.write_register(reg::CONFIG, self.config.bandwidth.config_bits())?;
        self.write_register(reg::ACCEL_CONFIG, self.config.range.config_bits())?;
        self.write_register(reg::PWR_MGMT_1, CLOCK_PLL_XGYRO)?;
        delay.delay_ms(RESET_DELAY_MS);

        Ok(())
    }

    /// Active configuration
    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Convert a raw output register value to m/s²
    fn scale(&self, raw: i16) -> f32 {
        f32::from(raw) / self.config.range.lsb_per_g() * STANDARD_GRAVITY
    }

    fn read_register(&mut self, register: u8) -> Result<u8, MotionError> {
        self.i2c
            .read_register(self.config.address, register)
            .map_err(|_| MotionError::Bus)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), MotionError> {
        self.i2c
            .write_register(self.config.address, register, value)
            .map_err(|_| MotionError::Bus)
    }
}

impl<I2C: I2cBus> MotionSensor for Mpu6050<I2C> {
    fn read(&mut self) -> Result<AccelSample, MotionError> {
        let mut buf = [0u8; 6];
        self.i2c
            .read_registers(self.config.address, reg::ACCEL_XOUT_H, &mut buf)
            .map_err(|_| MotionError::Bus)?;

        let x = i16::from_be_bytes([buf[0], buf[1]]);
        let y = i16::from_be_bytes([buf[2], buf[3]]);
        let z = i16::from_be_bytes([buf[4], buf[5]]);

        Ok(AccelSample::new(self.scale(x), self.scale(y), self.scale(z)))
    }
}
