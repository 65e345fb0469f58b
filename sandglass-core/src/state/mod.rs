//! Mode state machine
//!
//! Defines the authoritative runtime behavior of the timer.
//! The state machine is explicit, finite, and deterministic; the controller
//! turns sensor and dial input into [`Event`]s and feeds them through
//! [`Mode::transition`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Mode, ModeKind};
