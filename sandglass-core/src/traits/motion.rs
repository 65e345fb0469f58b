//! Motion sensor trait

use crate::sensing::AccelSample;

/// Errors that can occur reading the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Bus transaction failed
    Bus,
    /// Device answered with an unexpected identity
    WrongDevice {
        /// Identity register value read back
        id: u8,
    },
}

/// Trait for accelerometers
///
/// Implementations return acceleration in m/s² along the device axes
/// used by the orientation classifier (`y` along the long edge).
pub trait MotionSensor {
    /// Read one acceleration sample
    fn read(&mut self) -> Result<AccelSample, MotionError>;
}
