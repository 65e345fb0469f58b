//! LED matrix drivers

pub mod is31fl3731;

pub use is31fl3731::{wing_led_index, Is31fl3731Wing};
