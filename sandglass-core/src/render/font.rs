//! 3x5 digit font
//!
//! Just enough glyphs for the "M:SS" duration readout, as an
//! `embedded-graphics` mono font. Four cells with one column of spacing fill
//! the 15 matrix columns exactly. With the default alphabetic baseline, text
//! drawn at `y` covers rows `y - 5 ..= y - 1`.

use embedded_graphics::{
    geometry::Size,
    image::ImageRaw,
    mono_font::{mapping::StrGlyphMapping, DecorationDimensions, MonoFont},
};

const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;

/// Glyph order in the font image; the last entry is used for unknown chars
const GLYPH_CHARS: &str = "0123456789: ";
const GLYPH_COUNT: usize = 12;

const IMAGE_WIDTH: usize = GLYPH_WIDTH * GLYPH_COUNT;
const ROW_BYTES: usize = IMAGE_WIDTH.div_ceil(8);

/// One row per entry, leftmost pixel in the highest bit
const GLYPHS: [[u8; GLYPH_HEIGHT]; GLYPH_COUNT] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b010], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
    [0b000, 0b010, 0b000, 0b010, 0b000], // :
    [0b000; GLYPH_HEIGHT],               // space
];

/// Lay the glyphs side by side into a byte-aligned, MSB-first bitmap
const fn pack(glyphs: &[[u8; GLYPH_HEIGHT]; GLYPH_COUNT]) -> [u8; ROW_BYTES * GLYPH_HEIGHT] {
    let mut data = [0u8; ROW_BYTES * GLYPH_HEIGHT];
    let mut g = 0;
    while g < GLYPH_COUNT {
        let mut row = 0;
        while row < GLYPH_HEIGHT {
            let mut dx = 0;
            while dx < GLYPH_WIDTH {
                if glyphs[g][row] & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                    let bit = g * GLYPH_WIDTH + dx;
                    data[row * ROW_BYTES + bit / 8] |= 0x80 >> (bit % 8);
                }
                dx += 1;
            }
            row += 1;
        }
        g += 1;
    }
    data
}

const FONT_DATA: [u8; ROW_BYTES * GLYPH_HEIGHT] = pack(&GLYPHS);

const GLYPH_MAPPING: StrGlyphMapping<'static> = StrGlyphMapping::new(GLYPH_CHARS, GLYPH_COUNT - 1);

/// Monospace 3x5 digits, colon and space
pub const FONT_3X5: MonoFont<'static> = MonoFont {
    image: ImageRaw::new(&FONT_DATA, IMAGE_WIDTH as u32),
    glyph_mapping: &GLYPH_MAPPING,
    character_size: Size::new(GLYPH_WIDTH as u32, GLYPH_HEIGHT as u32),
    character_spacing: 1,
    baseline: GLYPH_HEIGHT as u32,
    underline: DecorationDimensions::new(GLYPH_HEIGHT as u32, 1),
    strikethrough: DecorationDimensions::new(2, 1),
};
