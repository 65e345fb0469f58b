//! Sand animation and duration readout
//!
//! The countdown is drawn as an hourglass lying across the matrix. Sand
//! starts in the eight columns left of (and including) the throat at column
//! 7 and moves, one column at a time, to the right edge as time passes.
//!
//! Every sand pixel cycles through the palette ramp. The phase of a pixel
//! depends on its row (so each column shows a diagonal stripe) and on time
//! divided by a per-column divisor, which is smallest next to the throat:
//! grains near the throat appear to move fastest.
//!
//! Progress is always derived from the elapsed time passed in, never
//! accumulated, so a late or skipped frame cannot make the animation drift.

use core::fmt::Write;

use embedded_graphics::{
    geometry::Point,
    mono_font::MonoTextStyle,
    pixelcolor::Gray8,
    text::Text,
    Drawable,
};
use heapless::String;

use super::buffer::{PixelBuffer, Rotation, MATRIX_HEIGHT, MATRIX_WIDTH};
use super::font::FONT_3X5;
use crate::config::{Palette, TimerConfig};
use crate::duration::TimerDuration;

/// Column of the hourglass throat
const THROAT_X: usize = MATRIX_WIDTH / 2;

/// Columns to the right of the throat, i.e. how many can fill up
pub const MAX_FILLED_COLUMNS: u32 = (MATRIX_WIDTH - THROAT_X - 1) as u32;

/// Slowest and per-column texture divisors (ms per phase step)
const MIN_PHASE_DIVISOR_MS: u32 = 35;
const PHASE_DIVISOR_STEP_MS: u32 = 25;

/// Duration text origin, on the alphabetic baseline
const TEXT_ORIGIN: Point = Point::new(0, 6);

/// The throat outline: a wedge hanging from the top edge, one standing on
/// the bottom edge, and two shoulder pixels beside the lower wedge
const THROAT: [(usize, usize); 14] = [
    // Upper wedge
    (THROAT_X - 1, 0),
    (THROAT_X, 0),
    (THROAT_X + 1, 0),
    (THROAT_X - 1, 1),
    (THROAT_X, 1),
    (THROAT_X + 1, 1),
    (THROAT_X, 2),
    // Lower wedge
    (THROAT_X, 4),
    (THROAT_X, 5),
    (THROAT_X - 1, 6),
    (THROAT_X, 6),
    (THROAT_X + 1, 6),
    // Shoulders
    (THROAT_X - 1, 5),
    (THROAT_X + 1, 5),
];

/// Countdown progress at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    elapsed_ms: u32,
    total_ms: u32,
}

impl Progress {
    pub fn new(elapsed_ms: u32, duration: TimerDuration) -> Self {
        Self {
            elapsed_ms,
            total_ms: duration.total_ms(),
        }
    }

    /// Fraction of the duration that has passed, 1.0 and above once done
    pub fn percent_done(&self) -> f32 {
        if self.total_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms as f32 / self.total_ms as f32
    }

    /// The full duration has passed
    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }

    /// Columns of sand that have run through the throat
    ///
    /// `floor(MAX_FILLED_COLUMNS * percent_done)` capped at the maximum,
    /// computed in integers so the step points are exact.
    pub fn filled_columns(&self) -> u32 {
        if self.is_complete() {
            return MAX_FILLED_COLUMNS;
        }
        let filled = u64::from(MAX_FILLED_COLUMNS) * u64::from(self.elapsed_ms)
            / u64::from(self.total_ms);
        filled as u32
    }
}

/// Stateless frame renderer
#[derive(Debug, Clone, Copy)]
pub struct SandRenderer {
    palette: Palette,
    blink_period_ms: u32,
}

impl SandRenderer {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            palette: config.palette,
            blink_period_ms: config.blink_period_ms,
        }
    }

    /// Frame showing the selected duration as "M:SS"
    pub fn duration_frame(&self, duration: TimerDuration, rotation: Rotation) -> PixelBuffer {
        let mut frame = PixelBuffer::new();

        let (minutes, seconds) = duration.minutes_seconds();
        let mut text: String<8> = String::new();
        // Longest possible value is "63:45", which fits
        let _ = write!(text, "{}:{:02}", minutes, seconds);

        let style = MonoTextStyle::new(&FONT_3X5, Gray8::new(self.palette.text));
        // Drawing into a PixelBuffer cannot fail
        let _ = Text::new(&text, TEXT_ORIGIN, style).draw(&mut frame);
        frame.rotate(rotation);
        frame
    }

    /// Countdown frame `elapsed_ms` after the start
    ///
    /// Once the duration has passed the whole matrix blinks instead.
    pub fn countdown_frame(
        &self,
        elapsed_ms: u32,
        duration: TimerDuration,
        rotation: Rotation,
    ) -> PixelBuffer {
        let progress = Progress::new(elapsed_ms, duration);

        if progress.is_complete() {
            let value = if self.blink_on(elapsed_ms) {
                self.palette.blink
            } else {
                0
            };
            return PixelBuffer::filled(value);
        }

        let mut frame = PixelBuffer::new();
        let filled = progress.filled_columns() as usize;

        // Sand still above the throat, drawn from the throat outwards
        self.draw_sand(&mut frame, THROAT_X, THROAT_X + 1 - filled, true, elapsed_ms);
        // Sand that has already run through, against the far edge
        self.draw_sand(&mut frame, MATRIX_WIDTH - filled, filled, false, elapsed_ms);

        for &(x, y) in THROAT.iter() {
            frame.set(x, y, self.palette.indent);
        }

        frame.rotate(rotation);
        frame
    }

    /// Blink phase: on for the later half of every period
    pub fn blink_on(&self, elapsed_ms: u32) -> bool {
        elapsed_ms % self.blink_period_ms > self.blink_period_ms / 2
    }

    fn draw_sand(
        &self,
        frame: &mut PixelBuffer,
        x_start: usize,
        columns: usize,
        reverse: bool,
        elapsed_ms: u32,
    ) {
        for offset in 0..columns {
            let x = if reverse {
                x_start - offset
            } else {
                x_start + offset
            };
            for y in 0..MATRIX_HEIGHT {
                frame.set(x, y, self.sand_value(elapsed_ms, offset, y));
            }
        }
    }

    fn sand_value(&self, elapsed_ms: u32, offset: usize, row: usize) -> u8 {
        let divisor = ((offset as u32 + 1) * PHASE_DIVISOR_STEP_MS).max(MIN_PHASE_DIVISOR_MS);
        let phase = i64::from(elapsed_ms / divisor);
        let row = row as i64;

        // Alternate stripe direction between neighbouring columns
        let shifted = if offset % 2 == 0 { phase + row } else { phase - row };
        let ramp = &self.palette.sand;
        ramp[shifted.rem_euclid(ramp.len() as i64) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ONE_MINUTE: TimerDuration = TimerDuration::from_quarters(4);

    fn renderer() -> SandRenderer {
        SandRenderer::new(&TimerConfig::default())
    }

    fn column_lit(frame: &PixelBuffer, x: usize) -> bool {
        (0..MATRIX_HEIGHT).all(|y| frame.get(x, y).unwrap_or(0) != 0)
    }

    fn column_dark(frame: &PixelBuffer, x: usize) -> bool {
        (0..MATRIX_HEIGHT).all(|y| frame.get(x, y) == Some(0))
    }

    #[test]
    fn test_filled_columns_scenario() {
        assert_eq!(Progress::new(0, ONE_MINUTE).filled_columns(), 0);
        assert_eq!(Progress::new(30_000, ONE_MINUTE).filled_columns(), 3);
        assert!(Progress::new(60_000, ONE_MINUTE).is_complete());
    }

    #[test]
    fn test_percent_done_reaches_one_exactly_at_duration() {
        let done = Progress::new(60_000, ONE_MINUTE);
        assert_eq!(done.percent_done(), 1.0);
        assert!(done.is_complete());

        let almost = Progress::new(59_999, ONE_MINUTE);
        assert!(almost.percent_done() < 1.0);
        assert!(!almost.is_complete());
        assert_eq!(almost.filled_columns(), 6);
    }

    #[test]
    fn test_start_frame_has_all_sand_on_top() {
        let frame = renderer().countdown_frame(0, ONE_MINUTE, Rotation::Normal);

        for x in 0..THROAT_X {
            assert!(column_lit(&frame, x), "column {x} should hold sand");
        }
        for x in THROAT_X + 2..MATRIX_WIDTH {
            assert!(column_dark(&frame, x), "column {x} should be empty");
        }
    }

    #[test]
    fn test_halfway_frame_regions() {
        let frame = renderer().countdown_frame(30_000, ONE_MINUTE, Rotation::Normal);

        // Five columns left above the throat (3..=7), three below (12..=14)
        for x in 0..3 {
            assert!(column_dark(&frame, x));
        }
        for x in 3..THROAT_X {
            assert!(column_lit(&frame, x));
        }
        for x in 9..12 {
            assert!(column_dark(&frame, x));
        }
        for x in 12..MATRIX_WIDTH {
            assert!(column_lit(&frame, x));
        }
    }

    #[test]
    fn test_throat_is_always_drawn() {
        let r = renderer();
        for elapsed in [0, 10_000, 45_000, 59_000] {
            let frame = r.countdown_frame(elapsed, ONE_MINUTE, Rotation::Normal);
            for &(x, y) in THROAT.iter() {
                assert_eq!(frame.get(x, y), Some(1));
            }
        }
    }

    #[test]
    fn test_texture_formula() {
        let r = renderer();

        // Throat column, row 3 is not covered by the outline
        let frame = r.countdown_frame(0, ONE_MINUTE, Rotation::Normal);
        assert_eq!(frame.get(7, 3), Some(40)); // (0 + 3) % 5
        assert_eq!(frame.get(6, 3), Some(30)); // (0 - 3) mod 5

        let frame = r.countdown_frame(1_000, ONE_MINUTE, Rotation::Normal);
        assert_eq!(frame.get(7, 3), Some(20)); // (1000 / 35 + 3) % 5
    }

    #[test]
    fn test_completion_blinks() {
        let r = renderer();
        assert_eq!(
            r.countdown_frame(60_000, ONE_MINUTE, Rotation::Normal),
            PixelBuffer::filled(0)
        );
        assert_eq!(
            r.countdown_frame(60_600, ONE_MINUTE, Rotation::Normal),
            PixelBuffer::filled(40)
        );
        assert_eq!(
            r.countdown_frame(61_000, ONE_MINUTE, Rotation::Normal),
            PixelBuffer::filled(0)
        );
    }

    #[test]
    fn test_blink_phase_boundaries() {
        let r = renderer();
        assert!(!r.blink_on(500));
        assert!(r.blink_on(501));
        assert!(r.blink_on(999));
        assert!(!r.blink_on(1_000));
    }

    #[test]
    fn test_inverted_countdown_mirrors_sand() {
        let r = renderer();
        let normal = r.countdown_frame(30_000, ONE_MINUTE, Rotation::Normal);
        let mut inverted = r.countdown_frame(30_000, ONE_MINUTE, Rotation::Inverted);
        inverted.rotate(Rotation::Inverted);
        assert_eq!(inverted, normal);
    }

    #[test]
    fn test_duration_frame_text() {
        let r = renderer();
        let frame = r.duration_frame(TimerDuration::from_quarters(2), Rotation::Normal);

        // "0:30": the zero occupies columns 0..=2 on rows 1..=5
        assert_eq!(frame.get(0, 1), Some(40));
        assert_eq!(frame.get(1, 1), Some(40));
        assert_eq!(frame.get(1, 2), Some(0));
        // Colon in the second cell, middle column
        assert_eq!(frame.get(5, 2), Some(40));
        assert_eq!(frame.get(5, 4), Some(40));
        assert_eq!(frame.get(4, 2), Some(0));
        // Last digit ends on the right edge
        assert_eq!(frame.get(MATRIX_WIDTH - 1, 1), Some(40));
        // Nothing on the top and bottom rows
        assert!((0..MATRIX_WIDTH).all(|x| frame.get(x, 0) == Some(0)));
        assert!((0..MATRIX_WIDTH).all(|x| frame.get(x, 6) == Some(0)));
    }

    #[test]
    fn test_duration_frame_inverted() {
        let r = renderer();
        let d = TimerDuration::from_quarters(9);
        let mut frame = r.duration_frame(d, Rotation::Inverted);
        frame.rotate(Rotation::Inverted);
        assert_eq!(frame, r.duration_frame(d, Rotation::Normal));
    }

    proptest! {
        #[test]
        fn prop_rendering_is_deterministic(
            elapsed in 0u32..400_000,
            quarters in 1u8..=20,
            inverted in any::<bool>(),
        ) {
            let r = renderer();
            let d = TimerDuration::from_quarters(quarters);
            let rotation = Rotation::for_facing_up(!inverted);
            prop_assert_eq!(
                r.countdown_frame(elapsed, d, rotation),
                r.countdown_frame(elapsed, d, rotation)
            );
        }

        #[test]
        fn prop_filled_columns_never_exceed_half(
            elapsed in any::<u32>(),
            quarters in 1u8..=20,
        ) {
            let p = Progress::new(elapsed, TimerDuration::from_quarters(quarters));
            prop_assert!(p.filled_columns() <= MAX_FILLED_COLUMNS);
            prop_assert_eq!(p.is_complete(), p.percent_done() >= 1.0);
        }
    }
}
