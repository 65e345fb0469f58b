//! GPIO inputs for RP2040

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;

use sandglass_hal::InputPin;

/// Digital input with a configurable pull resistor
pub struct RpInput<'d> {
    inner: Input<'d>,
}

impl<'d> RpInput<'d> {
    /// Configure a pin as input
    pub fn new(pin: Peri<'d, impl Pin>, pull: Pull) -> Self {
        Self {
            inner: Input::new(pin, pull),
        }
    }

    /// Configure a pin as input with the internal pull-up enabled
    ///
    /// Encoder contacts switch to ground, so this is the usual choice.
    pub fn pulled_up(pin: Peri<'d, impl Pin>) -> Self {
        Self::new(pin, Pull::Up)
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.inner.is_high()
    }
}
