//! User input
//!
//! The dial is the only control on the device besides turning it over.

pub mod dial;

pub use dial::{DialInput, EncoderDelta};
