//! Dial input
//!
//! The encoder driver reports a raw signed count (four counts per detent on
//! the reference encoder). The dial only reports a step once the count has
//! moved at least `min_change` away from the last *committed* position, so
//! slow turns accumulate until they cross the threshold and jitter around a
//! detent never registers.

/// Debounced dial movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderDelta {
    /// Turned towards larger counts
    Increment,
    /// Turned towards smaller counts
    Decrement,
    /// Not turned far enough since the last commit
    None,
}

/// Threshold debouncer over a raw encoder count
#[derive(Debug, Clone, Copy)]
pub struct DialInput {
    /// Last committed raw position
    committed: i32,
    /// Counts required for a step
    min_change: u32,
}

impl DialInput {
    /// Create a dial whose baseline is the current raw position
    pub fn new(position: i32, min_change: u32) -> Self {
        Self {
            committed: position,
            min_change,
        }
    }

    /// Check for movement without committing it
    pub fn has_moved(&self, position: i32) -> bool {
        position.abs_diff(self.committed) >= self.min_change
    }

    /// Commit the movement, if any, and report its direction
    ///
    /// Returns [`EncoderDelta::None`] without side effects when the dial has
    /// not moved far enough.
    pub fn consume(&mut self, position: i32) -> EncoderDelta {
        if !self.has_moved(position) {
            return EncoderDelta::None;
        }

        let delta = if position > self.committed {
            EncoderDelta::Increment
        } else {
            EncoderDelta::Decrement
        };
        self.committed = position;
        delta
    }

    /// Last committed raw position
    pub fn committed(&self) -> i32 {
        self.committed
    }
}
