//! Motion sensing
//!
//! Turns raw accelerometer samples into the discrete orientation the timer
//! reacts to, and tracks how long the device has been left alone.

pub mod activity;
pub mod orientation;

pub use activity::ActivityTracker;
pub use orientation::{AccelSample, Orientation, OrientationClassifier};
