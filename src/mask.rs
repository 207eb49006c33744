// Test masks for the distance field engine.

use crate::buffer::ColorBuffer;
use crate::types::Color;

/// Fully opaque: foreground for the distance field engine.
pub const FOREGROUND: Color = Color::rgba(0, 0, 0, 255);

/// 5x5 letter "A". Each u8 is a row, top first; the low 5 bits are the
/// pixels (bit 4 = leftmost).
const GLYPH_A: [u8; 5] = [0b00100, 0b01010, 0b10001, 0b11111, 0b10001];

/// A `size` x `size` mask with the letter "A" scaled into the square left
/// after removing `margin` pixels on every side.
///
/// Rows are laid out bottom-up, so the letter is upright once the buffer is
/// written as a bitmap. A margin of half the size or more gives an empty mask.
///
/// Visual: a blocky white "A" on a transparent square.
pub fn glyph_mask(size: usize, margin: usize) -> ColorBuffer {
    let mut mask = ColorBuffer::new(size, size);
    let inner = size.saturating_sub(2 * margin);
    if inner == 0 {
        return mask;
    }

    for y in margin..margin + inner {
        for x in margin..margin + inner {
            let col = 5 * (x - margin) / inner;
            let row = 4 - 5 * (y - margin) / inner;
            if GLYPH_A[row] & (1 << (4 - col)) != 0 {
                mask.plot(x as i32, y as i32, FOREGROUND);
            }
        }
    }
    mask
}
