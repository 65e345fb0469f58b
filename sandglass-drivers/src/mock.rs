//! Scripted bus for driver tests

use sandglass_hal::I2cBus;

/// I2C bus that records writes and serves reads from a register file
pub struct MockI2c {
    /// Every write, as (address, bytes)
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Register contents returned by `write_read`
    pub registers: [u8; 256],
    /// Fail every transaction
    pub fail: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            registers: [0; 256],
            fail: false,
        }
    }

    /// Writes to a register, in order, ignoring burst payloads
    pub fn register_writes(&self, register: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(_, data)| data.len() == 2 && data[0] == register)
            .map(|(_, data)| data[1])
            .collect()
    }
}

impl I2cBus for MockI2c {
    type Error = ();

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        buf.fill(0);
        Ok(())
    }

    fn write_read(&mut self, _address: u8, write: &[u8], read: &mut [u8]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        let start = write[0] as usize;
        read.copy_from_slice(&self.registers[start..start + read.len()]);
        Ok(())
    }
}

/// Delay that returns immediately and records the total requested
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
