//! Millisecond timestamps
//!
//! Timestamps are the free-running `u32` millisecond counter of the board.
//! All comparisons go through [`elapsed_ms`] so a counter wrap (every ~49.7
//! days) only ever looks like a short interval, never a negative one.

/// Milliseconds since boot, wrapping
pub type Millis = u32;

/// Milliseconds from `since` to `now`, tolerant of a counter wrap
#[inline]
pub fn elapsed_ms(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_plain() {
        assert_eq!(elapsed_ms(1_500, 1_000), 500);
        assert_eq!(elapsed_ms(7, 7), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        assert_eq!(elapsed_ms(10, u32::MAX - 9), 20);
    }
}
