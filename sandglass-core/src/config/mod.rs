//! Configuration types
//!
//! Every tunable of the timer lives here. The defaults match the stock
//! hardware; boards with a different sensor range or matrix
//! palette override individual fields.

pub mod types;

pub use types::*;
