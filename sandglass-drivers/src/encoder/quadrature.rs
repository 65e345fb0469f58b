//! Quadrature decoder for mechanical rotary encoders
//!
//! Counts every valid edge on either channel, so a typical detented
//! encoder advances the count by 4 per click. The dial logic above this
//! layer decides how many counts make a step.
//!
//! Quadrature encoding, as (A, B):
//! - CW:  (1,1) -> (0,1) -> (0,0) -> (1,0) -> (1,1)
//! - CCW: (1,1) -> (1,0) -> (0,0) -> (0,1) -> (1,1)
//!
//! A change of both channels at once means an edge was missed. It carries
//! no direction, so it is dropped rather than guessed.

use sandglass_core::traits::EncoderCounter;
use sandglass_hal::InputPin;

/// Count change indexed by `previous << 2 | current`, state = A << 1 | B
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0,
];

/// Pin-independent quadrature state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    state: u8,
    count: i32,
}

impl QuadratureDecoder {
    /// Start from the current channel levels with a count of zero
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: Self::encode(a, b),
            count: 0,
        }
    }

    /// Feed the current channel levels, returning the count change
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let next = Self::encode(a, b);
        let delta = TRANSITIONS[usize::from((self.state << 2) | next)];
        self.state = next;
        self.count = self.count.wrapping_add(i32::from(delta));
        delta
    }

    /// Accumulated count
    pub fn count(&self) -> i32 {
        self.count
    }

    fn encode(a: bool, b: bool) -> u8 {
        (u8::from(a) << 1) | u8::from(b)
    }
}

/// Encoder decoded by sampling two input pins
///
/// Edges are only seen when [`poll`](Self::poll) runs, so it must be
/// called faster than the fastest expected edge rate.
pub struct PolledEncoder<A, B> {
    a: A,
    b: B,
    decoder: QuadratureDecoder,
}

impl<A: InputPin, B: InputPin> PolledEncoder<A, B> {
    /// Create from the two channel pins, taking the current levels as rest
    pub fn new(a: A, b: B) -> Self {
        let decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
        Self { a, b, decoder }
    }

    /// Sample both pins once, returning the count change
    pub fn poll(&mut self) -> i8 {
        self.decoder.update(self.a.is_high(), self.b.is_high())
    }

    /// Accumulated count without sampling
    pub fn count(&self) -> i32 {
        self.decoder.count()
    }
}

impl<A: InputPin, B: InputPin> EncoderCounter for PolledEncoder<A, B> {
    fn position(&mut self) -> i32 {
        self.poll();
        self.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    /// Pin whose level the test sets through a shared cell
    struct MockPin<'a>(&'a Cell<bool>);

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_detent_cw_counts_four() {
        let mut decoder = QuadratureDecoder::new(true, true);
        for (a, b) in CW {
            assert_eq!(decoder.update(a, b), 1);
        }
        assert_eq!(decoder.count(), 4);
    }

    #[test]
    fn test_detent_ccw_counts_minus_four() {
        let mut decoder = QuadratureDecoder::new(true, true);
        for (a, b) in CCW {
            assert_eq!(decoder.update(a, b), -1);
        }
        assert_eq!(decoder.count(), -4);
    }

    #[test]
    fn test_contact_bounce_cancels() {
        let mut decoder = QuadratureDecoder::new(true, true);
        for _ in 0..5 {
            decoder.update(false, true);
            decoder.update(true, true);
        }
        assert_eq!(decoder.count(), 0);
    }

    #[test]
    fn test_missed_edge_is_dropped() {
        let mut decoder = QuadratureDecoder::new(true, true);
        assert_eq!(decoder.update(false, false), 0);
        // Decoding resumes from the new state
        assert_eq!(decoder.update(true, false), 1);
    }

    #[test]
    fn test_polled_encoder_reads_pins() {
        let a = Cell::new(true);
        let b = Cell::new(true);
        let mut encoder = PolledEncoder::new(MockPin(&a), MockPin(&b));
        assert_eq!(encoder.position(), 0);

        for (level_a, level_b) in CW.iter().chain(CW.iter()) {
            a.set(*level_a);
            b.set(*level_b);
            encoder.poll();
        }
        assert_eq!(encoder.position(), 8);

        a.set(false);
        assert_eq!(encoder.position(), 9);
    }

    proptest! {
        #[test]
        fn test_full_cycles_net_out(cw in 0usize..20, ccw in 0usize..20) {
            let mut decoder = QuadratureDecoder::new(true, true);
            for _ in 0..cw {
                for (a, b) in CW {
                    decoder.update(a, b);
                }
            }
            for _ in 0..ccw {
                for (a, b) in CCW {
                    decoder.update(a, b);
                }
            }
            prop_assert_eq!(decoder.count(), 4 * (cw as i32 - ccw as i32));
        }
    }
}
