//! Timer duration
//!
//! Durations are counted in quarter minutes. Every value the dial can reach
//! is then exactly representable, so repeated adjustment can never drift off
//! the 0.25 minute grid the way an accumulated float would.

use crate::config::{DurationLimits, MS_PER_QUARTER};
use crate::input::EncoderDelta;

/// Countdown length, a whole number of quarter minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerDuration {
    quarters: u8,
}

impl TimerDuration {
    /// Create a duration of `quarters` quarter minutes
    pub const fn from_quarters(quarters: u8) -> Self {
        Self { quarters }
    }

    /// Initial duration from the configured limits
    pub fn initial(limits: &DurationLimits) -> Self {
        Self::from_quarters(limits.initial_quarters)
    }

    /// Length in quarter minutes
    pub const fn quarters(&self) -> u8 {
        self.quarters
    }

    /// Length in minutes
    pub fn minutes(&self) -> f32 {
        f32::from(self.quarters) * 0.25
    }

    /// Length in milliseconds
    pub const fn total_ms(&self) -> u32 {
        self.quarters as u32 * MS_PER_QUARTER
    }

    /// Whole minutes and remaining seconds, as shown on the display
    pub const fn minutes_seconds(&self) -> (u32, u32) {
        let seconds = self.total_ms() / 1_000;
        (seconds / 60, seconds % 60)
    }

    /// Apply one dial step, clamped to the limits
    pub fn adjust(self, delta: EncoderDelta, limits: &DurationLimits) -> Self {
        let quarters = match delta {
            EncoderDelta::Increment => self.quarters.saturating_add(limits.step_quarters),
            EncoderDelta::Decrement => self.quarters.saturating_sub(limits.step_quarters),
            EncoderDelta::None => self.quarters,
        };

        Self::from_quarters(quarters.clamp(limits.min_quarters, limits.max_quarters))
    }
}
