//! Glyph compositing for string rendering
//!
//! Strings are rendered in two passes. A metrics pass aggregates the line
//! box from the glyph records: the tallest extent above the baseline
//! (ascent), the deepest extent below it (descent), and the summed
//! horizontal advance. A composite pass then unpacks each glyph's packed
//! bitmap row by row into a line buffer of that size, `None` marking
//! background slots and `Some(color)` marking glyph pixels.
//!
//! The composed line is blitted through the stencil writer exactly like a
//! transparent icon: one window, one pixel stream, instead of a window
//! reset per character.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Rgb565;
use crate::error::Error;
use crate::font::Font;

/// A composed line of text: the blit rectangle plus one optional color per
/// pixel, row-major
pub(crate) struct ComposedLine {
    /// Line width in pixels (sum of glyph advances)
    pub width: u32,
    /// Line height in pixels (ascent + descent)
    pub height: u32,
    /// Pixel mask; `None` slots re-emit the background color
    pub pixels: Vec<Option<Rgb565>>,
}

/// Compose `text` into a line buffer.
///
/// Character codes are the string's bytes. Returns `Ok(None)` when there is
/// nothing to draw (empty string or zero-area metrics).
///
/// # Errors
///
/// Returns [`Error::UnsupportedCharacter`] if any byte falls outside the
/// font's glyph range; nothing is composed in that case.
pub(crate) fn compose(
    text: &str,
    color: Rgb565,
    font: &Font<'_>,
) -> Result<Option<ComposedLine>, Error> {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut ascent: i32 = 0;
    let mut descent: i32 = 0;
    let mut width: u32 = 0;

    for code in text.bytes() {
        let glyph = font.glyph(code)?;
        ascent = ascent.max(i32::from(glyph.y_offset).abs());
        descent = descent.max(i32::from(glyph.height) + i32::from(glyph.y_offset));
        width += u32::from(glyph.x_advance);
        glyphs.push(glyph);
    }

    let height = ascent + descent;
    if width == 0 || height <= 0 {
        return Ok(None);
    }

    let mut pixels: Vec<Option<Rgb565>> = vec![None; width as usize * height as usize];

    for row in 0..height {
        // Horizontal cursor, advanced per glyph; x_offset can reach left of
        // it, so positions are signed and clipped to the line box.
        let mut cursor: i32 = 0;
        for glyph in &glyphs {
            let rel_top = row - (ascent + i32::from(glyph.y_offset));
            let rel_bottom = (row - ascent) - (i32::from(glyph.height) + i32::from(glyph.y_offset));
            if rel_top >= 0 && rel_bottom <= 0 {
                for col in 0..i32::from(glyph.width) {
                    let x = cursor + i32::from(glyph.x_offset) + col;
                    if x < 0 || x >= width as i32 {
                        continue;
                    }
                    let slot = row as usize * width as usize + x as usize;
                    pixels[slot] = font
                        .pixel_at(glyph, rel_top as usize, col as usize)
                        .then_some(color);
                }
            }
            cursor += i32::from(glyph.x_advance);
        }
    }

    Ok(Some(ComposedLine {
        width,
        height: height as u32,
        pixels,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Glyph;

    const COLOR: Rgb565 = Rgb565::RED;

    fn font_with(glyphs: &'static [Glyph], bitmap: &'static [u8]) -> Font<'static> {
        Font {
            first: b'a',
            glyphs,
            bitmap,
        }
    }

    fn composed(text: &str, font: &Font<'_>) -> ComposedLine {
        match compose(text, COLOR, font) {
            Ok(Some(line)) => line,
            _ => panic!("expected {text:?} to compose"),
        }
    }

    #[test]
    fn test_width_is_advance_sum_independent_of_heights() {
        // Two glyphs with very different heights but fixed advances.
        static BITMAP: [u8; 8] = [0xFF; 8];
        static GLYPHS: [Glyph; 2] = [
            Glyph {
                bitmap_offset: 0,
                width: 2,
                height: 8,
                x_advance: 4,
                x_offset: 0,
                y_offset: -8,
            },
            Glyph {
                bitmap_offset: 0,
                width: 3,
                height: 1,
                x_advance: 5,
                x_offset: 0,
                y_offset: -1,
            },
        ];
        let font = font_with(&GLYPHS, &BITMAP);

        let line = composed("abba", &font);
        assert_eq!(line.width, 4 + 5 + 5 + 4);
        assert_eq!(line.height, 8);
    }

    #[test]
    fn test_all_set_glyph_fills_with_color() {
        // A fully set 4x4 glyph whose advance equals its width: the whole
        // buffer must be the requested color, no background slots.
        static BITMAP: [u8; 2] = [0xFF, 0xFF];
        static GLYPHS: [Glyph; 1] = [Glyph {
            bitmap_offset: 0,
            width: 4,
            height: 4,
            x_advance: 4,
            x_offset: 0,
            y_offset: -4,
        }];
        let font = font_with(&GLYPHS, &BITMAP);

        let line = composed("a", &font);
        assert_eq!(line.pixels.len(), 16);
        assert!(line.pixels.iter().all(|pixel| *pixel == Some(COLOR)));
    }

    #[test]
    fn test_baseline_alignment_of_mixed_glyphs() {
        // 'a': 1x4 column above the baseline; 'b': 1x2 column above the
        // baseline. Both bottom-align on the baseline, so 'b' occupies the
        // lower two rows of the 4-row line.
        static BITMAP: [u8; 1] = [0b1111_0000];
        static GLYPHS: [Glyph; 2] = [
            Glyph {
                bitmap_offset: 0,
                width: 1,
                height: 4,
                x_advance: 1,
                x_offset: 0,
                y_offset: -4,
            },
            Glyph {
                bitmap_offset: 0,
                width: 1,
                height: 2,
                x_advance: 1,
                x_offset: 0,
                y_offset: -2,
            },
        ];
        let font = font_with(&GLYPHS, &BITMAP);

        let line = composed("ab", &font);
        assert_eq!((line.width, line.height), (2, 4));
        let set: Vec<bool> = line.pixels.iter().map(Option::is_some).collect();
        assert_eq!(
            set,
            [
                true, false, // only 'a' reaches the top rows
                true, false, //
                true, true, // 'b' joins for the bottom two
                true, true, //
            ]
        );
    }

    #[test]
    fn test_descender_extends_line_below_baseline() {
        // 'a' sits on the baseline, 'b' dips two rows below it.
        static BITMAP: [u8; 1] = [0xFF];
        static GLYPHS: [Glyph; 2] = [
            Glyph {
                bitmap_offset: 0,
                width: 1,
                height: 2,
                x_advance: 1,
                x_offset: 0,
                y_offset: -2,
            },
            Glyph {
                bitmap_offset: 0,
                width: 1,
                height: 4,
                x_advance: 1,
                x_offset: 0,
                y_offset: -2,
            },
        ];
        let font = font_with(&GLYPHS, &BITMAP);

        let line = composed("ab", &font);
        // ascent 2, descent (4 - 2) = 2
        assert_eq!(line.height, 4);
        let set: Vec<bool> = line.pixels.iter().map(Option::is_some).collect();
        assert_eq!(
            set,
            [
                true, true, //
                true, true, //
                false, true, // only the descender below the baseline
                false, true, //
            ]
        );
    }

    #[test]
    fn test_x_offset_shifts_within_advance() {
        // Glyph narrower than its advance, drawn one column in.
        static BITMAP: [u8; 1] = [0xFF];
        static GLYPHS: [Glyph; 1] = [Glyph {
            bitmap_offset: 0,
            width: 1,
            height: 1,
            x_advance: 3,
            x_offset: 1,
            y_offset: -1,
        }];
        let font = font_with(&GLYPHS, &BITMAP);

        let line = composed("a", &font);
        let set: Vec<bool> = line.pixels.iter().map(Option::is_some).collect();
        assert_eq!(set, [false, true, false]);
    }

    #[test]
    fn test_negative_x_offset_is_clipped_at_line_start() {
        static BITMAP: [u8; 1] = [0xFF];
        static GLYPHS: [Glyph; 1] = [Glyph {
            bitmap_offset: 0,
            width: 2,
            height: 1,
            x_advance: 2,
            x_offset: -1,
            y_offset: -1,
        }];
        let font = font_with(&GLYPHS, &BITMAP);

        // First column hangs left of the line box and is dropped; the
        // second lands at x = 0.
        let line = composed("a", &font);
        let set: Vec<bool> = line.pixels.iter().map(Option::is_some).collect();
        assert_eq!(set, [true, false]);
    }

    #[test]
    fn test_row_past_glyph_bottom_stays_background() {
        // The row interval test admits the row just past a glyph's last
        // bitmap row; that row must come out as background, not as stray
        // bits from a neighboring glyph in the shared blob.
        static BITMAP: [u8; 2] = [0xFF, 0xFF];
        static GLYPHS: [Glyph; 2] = [
            Glyph {
                bitmap_offset: 0,
                width: 1,
                height: 2,
                x_advance: 1,
                x_offset: 0,
                y_offset: -3,
            },
            Glyph {
                bitmap_offset: 0,
                width: 1,
                height: 4,
                x_advance: 1,
                x_offset: 0,
                y_offset: -4,
            },
        ];
        let font = font_with(&GLYPHS, &BITMAP);

        let line = composed("ab", &font);
        assert_eq!(line.height, 4);
        let set: Vec<bool> = line.pixels.iter().map(Option::is_some).collect();
        // 'a' covers rows 1 and 2 (ascent 4, y_offset -3); row 3 touches
        // its interval edge but reads clear.
        assert_eq!(
            set,
            [
                false, true, //
                true, true, //
                true, true, //
                false, true, //
            ]
        );
    }

    #[test]
    fn test_unsupported_character_rejected() {
        static BITMAP: [u8; 1] = [0xFF];
        static GLYPHS: [Glyph; 1] = [Glyph {
            bitmap_offset: 0,
            width: 1,
            height: 1,
            x_advance: 1,
            x_offset: 0,
            y_offset: -1,
        }];
        let font = font_with(&GLYPHS, &BITMAP);

        assert!(matches!(
            compose("az", COLOR, &font),
            Err(Error::UnsupportedCharacter { code: b'z' })
        ));
    }

    #[test]
    fn test_empty_string_composes_nothing() {
        static BITMAP: [u8; 1] = [0xFF];
        static GLYPHS: [Glyph; 1] = [Glyph {
            bitmap_offset: 0,
            width: 1,
            height: 1,
            x_advance: 1,
            x_offset: 0,
            y_offset: -1,
        }];
        let font = font_with(&GLYPHS, &BITMAP);

        assert!(matches!(compose("", COLOR, &font), Ok(None)));
    }
}
