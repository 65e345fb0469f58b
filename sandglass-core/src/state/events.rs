//! Events that trigger mode transitions

use crate::time::Millis;

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User events
    /// The dial moved past its debounce threshold
    DialTurned,
    /// The classified orientation changed
    Flipped {
        /// The new orientation is Up or Down
        vertical: bool,
        /// When the flip was observed
        at: Millis,
    },

    // Timer events
    /// Fresh activity was seen while asleep
    Woke,
    /// No activity for the idle timeout
    ///
    /// In Countdown this is only raised once the countdown has completed;
    /// every running frame counts as activity.
    IdleTimeout,
}
