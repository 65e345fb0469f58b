//! Rotary encoder trait

/// Trait for rotary encoder counters
///
/// The count is signed and free-running; only differences matter to the
/// dial logic.
pub trait EncoderCounter {
    /// Current raw count
    ///
    /// Takes `&mut self` because polled decoders sample their pins here.
    fn position(&mut self) -> i32;
}
