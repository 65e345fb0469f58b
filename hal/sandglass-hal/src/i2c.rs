//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs. Both peripherals on the timer (motion sensor and
//! LED matrix controller) are register-mapped I2C devices, so the trait
//! also carries register-level helpers built on the three primitives.

use core::cell::RefCell;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write a single 8-bit register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[register, value])
    }

    /// Read a single 8-bit register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Read consecutive registers starting at `register`
    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register], buf)
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, write_data, read_buf)
    }
}

/// Handle to a bus shared by several drivers
///
/// The timer runs one loop that talks to one device at a time, so a
/// `RefCell` borrow per transaction is enough to share the bus.
pub struct SharedI2c<'a, B> {
    bus: &'a RefCell<B>,
}

impl<'a, B: I2cBus> SharedI2c<'a, B> {
    /// Create a handle to the shared bus
    pub fn new(bus: &'a RefCell<B>) -> Self {
        Self { bus }
    }
}

impl<B: I2cBus> I2cBus for SharedI2c<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_read(address, write_data, read_buf)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), what both timer peripherals are run at
    pub const FAST: Self = Self { frequency: 400_000 };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus with a 256-byte register file per call, for exercising the helpers
    struct RegisterFile {
        regs: [u8; 256],
        last_address: u8,
    }

    impl I2cBus for RegisterFile {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            self.last_address = address;
            let (reg, values) = data.split_first().ok_or(())?;
            for (i, v) in values.iter().enumerate() {
                self.regs[*reg as usize + i] = *v;
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Err(())
        }

        fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), ()> {
            self.last_address = address;
            let start = write[0] as usize;
            read.copy_from_slice(&self.regs[start..start + read.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_register_round_trip() {
        let mut bus = RegisterFile {
            regs: [0; 256],
            last_address: 0,
        };
        bus.write_register(0x68, 0x1C, 0x10).unwrap();
        assert_eq!(bus.last_address, 0x68);
        assert_eq!(bus.read_register(0x68, 0x1C), Ok(0x10));
    }

    #[test]
    fn test_read_registers_is_burst() {
        let mut bus = RegisterFile {
            regs: [0; 256],
            last_address: 0,
        };
        bus.regs[0x3B..0x3F].copy_from_slice(&[1, 2, 3, 4]);

        let mut buf = [0u8; 4];
        bus.read_registers(0x68, 0x3B, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_shared_handles_reach_same_bus() {
        let bus = RefCell::new(RegisterFile {
            regs: [0; 256],
            last_address: 0,
        });
        let mut motion = SharedI2c::new(&bus);
        let mut matrix = SharedI2c::new(&bus);

        motion.write_register(0x68, 0x6B, 0x01).unwrap();
        matrix.write_register(0x74, 0xFD, 0x0B).unwrap();
        assert_eq!(bus.borrow().last_address, 0x74);
        assert_eq!(motion.read_register(0x68, 0x6B), Ok(0x01));
        assert_eq!(matrix.read_register(0x74, 0xFD), Ok(0x0B));
    }

    #[test]
    fn test_default_is_fast_mode() {
        assert_eq!(I2cConfig::default().frequency, 400_000);
        assert_eq!(I2cConfig::STANDARD.frequency, 100_000);
    }
}
