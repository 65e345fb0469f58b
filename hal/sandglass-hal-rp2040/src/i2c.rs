//! Blocking I2C master for RP2040
//!
//! Wraps `embassy_rp::i2c::I2c` in blocking mode. Transfers on this board are
//! a handful of register accesses and one 144-byte frame, short enough that
//! the polling loop can wait for them.

use embassy_rp::i2c::{self, AbortReason, Blocking, Instance, I2c};
use embassy_rp::Peri;

use sandglass_hal::{I2cBus, I2cConfig};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// No device acknowledged the address or data
    Nack,
    /// Arbitration lost
    ArbitrationLost,
    /// Transfer aborted for another reason
    Bus,
    /// Buffer empty or too long for one transfer
    InvalidLength,
    /// Address out of range or reserved
    Address,
    /// Other error
    Other,
}

impl From<i2c::Error> for I2cBusError {
    fn from(e: i2c::Error) -> Self {
        match e {
            i2c::Error::Abort(AbortReason::NoAcknowledge) => I2cBusError::Nack,
            i2c::Error::Abort(AbortReason::ArbitrationLoss) => I2cBusError::ArbitrationLost,
            i2c::Error::Abort(_) => I2cBusError::Bus,
            i2c::Error::InvalidReadBufferLength | i2c::Error::InvalidWriteBufferLength => {
                I2cBusError::InvalidLength
            }
            i2c::Error::AddressOutOfRange(_) | i2c::Error::AddressReserved(_) => {
                I2cBusError::Address
            }
            #[allow(unreachable_patterns)]
            _ => I2cBusError::Other,
        }
    }
}

/// RP2040 I2C master in blocking mode
pub struct RpI2c<'d, T: Instance> {
    inner: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    /// Take ownership of an I2C peripheral and its pins
    pub fn new(
        peri: Peri<'d, T>,
        scl: Peri<'d, impl i2c::SclPin<T>>,
        sda: Peri<'d, impl i2c::SdaPin<T>>,
        config: I2cConfig,
    ) -> Self {
        let mut rp_config = i2c::Config::default();
        rp_config.frequency = config.frequency;

        Self {
            inner: I2c::new_blocking(peri, scl, sda, rp_config),
        }
    }
}

impl<T: Instance> I2cBus for RpI2c<'_, T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(address, data)?;
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.blocking_read(address, buf)?;
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.blocking_write_read(address, write_data, read_buf)?;
        Ok(())
    }
}
