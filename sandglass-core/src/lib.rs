//! Board-agnostic core logic for the sand timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motion sensor, encoder, matrix)
//! - Orientation classification and idle tracking
//! - Dial debouncing and duration adjustment
//! - Mode state machine and the timer controller
//! - Sand animation renderer
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod duration;
pub mod input;
pub mod render;
pub mod sensing;
pub mod state;
pub mod time;
pub mod timer;
pub mod traits;

pub use config::TimerConfig;
pub use duration::TimerDuration;
pub use timer::{DisplayUpdate, Inputs, SandTimer, Tick};
