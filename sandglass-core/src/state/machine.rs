//! State machine definition
//!
//! Display output, dial handling and sleep behavior are all a function of
//! the current mode and an event.

use super::events::Event;
use crate::time::Millis;

/// Timer modes
///
/// The countdown start time is carried by the `Countdown` variant, so it
/// exists exactly while a countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Display dark, waiting for the device to be picked up or the dial turned
    Sleep,
    /// Showing and adjusting the duration
    #[default]
    AdjustDuration,
    /// Sand running
    Countdown {
        /// When the countdown (re)started
        started_at: Millis,
    },
}

/// Mode without its data, for logging and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Sleep,
    AdjustDuration,
    Countdown,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Sleep => ModeKind::Sleep,
            Mode::AdjustDuration => ModeKind::AdjustDuration,
            Mode::Countdown { .. } => ModeKind::Countdown,
        }
    }

    /// Start time of the running countdown
    pub fn countdown_start(&self) -> Option<Millis> {
        match self {
            Mode::Countdown { started_at } => Some(*started_at),
            _ => None,
        }
    }

    /// Process an event and return the next mode
    ///
    /// This is the core transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            // Sleep transitions
            (Sleep, Woke) => AdjustDuration,
            (Sleep, DialTurned) => AdjustDuration,

            // AdjustDuration transitions
            (AdjustDuration, Flipped { vertical: true, at }) => Countdown { started_at: at },
            (AdjustDuration, IdleTimeout) => Sleep,

            // Countdown transitions
            (Countdown { .. }, DialTurned) => AdjustDuration,
            (Countdown { .. }, Flipped { vertical: false, .. }) => AdjustDuration,
            // Turning the hourglass over restarts it
            (Countdown { .. }, Flipped { vertical: true, at }) => Countdown { started_at: at },
            (Countdown { .. }, IdleTimeout) => Sleep,

            // Default: stay in current mode
            _ => self,
        }
    }
}
