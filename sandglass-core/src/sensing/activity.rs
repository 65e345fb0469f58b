//! Activity tracking
//!
//! The only activity the tracker notices on its own is an orientation
//! flip. Dial turns, running countdown frames and mode changes are
//! reported by the controller through [`ActivityTracker::touch`].

use super::orientation::Orientation;
use crate::time::{elapsed_ms, Millis};

/// Flip detector and idle timer
#[derive(Debug, Clone, Copy)]
pub struct ActivityTracker {
    /// Orientation at the last flip (or seed)
    last_orientation: Orientation,
    /// Timestamp of the last activity of any kind
    last_activity_ms: Millis,
    /// Idle threshold
    idle_timeout_ms: u32,
}

impl ActivityTracker {
    /// Create a tracker seeded with the current orientation
    ///
    /// Seeding avoids reporting the very first sample as a flip.
    pub fn new(orientation: Orientation, now: Millis, idle_timeout_ms: u32) -> Self {
        Self {
            last_orientation: orientation,
            last_activity_ms: now,
            idle_timeout_ms,
        }
    }

    /// Feed the latest orientation, returning whether it flipped
    ///
    /// A flip records `now` as the latest activity.
    pub fn on_tick(&mut self, orientation: Orientation, now: Millis) -> bool {
        if orientation == self.last_orientation {
            return false;
        }

        self.last_orientation = orientation;
        self.last_activity_ms = now;
        true
    }

    /// Record non-orientation activity
    pub fn touch(&mut self, now: Millis) {
        self.last_activity_ms = now;
    }

    /// More than the idle timeout has passed since the last activity
    pub fn is_idle(&self, now: Millis) -> bool {
        elapsed_ms(now, self.last_activity_ms) > self.idle_timeout_ms
    }

    /// Timestamp of the last activity
    pub fn last_activity(&self) -> Millis {
        self.last_activity_ms
    }
}
