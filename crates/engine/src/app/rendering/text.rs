use super::draw_list::Rgba;
use super::raster::Canvas;

pub(crate) const GLYPH_WIDTH: u32 = 3;
pub(crate) const GLYPH_HEIGHT: u32 = 5;
/// Horizontal advance per character, in font pixels.
pub(crate) const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

const FALLBACK_CHAR: char = '?';

// Printable ASCII from ' ' to '~'. Each entry packs five 3-bit rows, top row
// in the highest bits, leftmost column in the highest bit of each row.
const GLYPH_BITS: [u16; 95] = [
    0x0000, 0x2482, 0x5a00, 0x5f7d, 0x7ddf, 0x52a5, 0x2aab, 0x2400,
    0x1491, 0x4494, 0x0aa8, 0x05d0, 0x0014, 0x01c0, 0x0002, 0x12a4,
    0x7b6f, 0x2c97, 0x73e7, 0x73cf, 0x5bc9, 0x79cf, 0x79ef, 0x7292,
    0x7bef, 0x7bcf, 0x0410, 0x0414, 0x1511, 0x0e38, 0x4454, 0x72c2,
    0x7be7, 0x2bed, 0x6bae, 0x7927, 0x6b6e, 0x79a7, 0x79a4, 0x796f,
    0x5bed, 0x7497, 0x726f, 0x5bad, 0x4927, 0x5fed, 0x5ffd, 0x7b6f,
    0x6ba4, 0x7b79, 0x6bad, 0x79cf, 0x7492, 0x5b6f, 0x5b6a, 0x5bfd,
    0x5aad, 0x5a92, 0x72a7, 0x6926, 0x4889, 0x324b, 0x2a00, 0x0007,
    0x4400, 0x0e7f, 0x49ae, 0x0f27, 0x13ef, 0x0fa7, 0x39a4, 0x0f79,
    0x49ad, 0x2092, 0x106a, 0x4bad, 0x4927, 0x0ded, 0x0d6d, 0x0f6f,
    0x0d74, 0x0f79, 0x0d64, 0x0f8f, 0x2e93, 0x0b6f, 0x0b6a, 0x0b7a,
    0x0a95, 0x0b79, 0x0e57, 0x3593, 0x2492, 0x64d6, 0x0780,
];

pub(crate) fn glyph_bits(ch: char) -> Option<u16> {
    match ch {
        ' '..='~' => GLYPH_BITS.get(ch as usize - ' ' as usize).copied(),
        _ => None,
    }
}

fn glyph_or_fallback(ch: char) -> u16 {
    glyph_bits(ch)
        .or_else(|| glyph_bits(FALLBACK_CHAR))
        .unwrap_or(0)
}

fn glyph_pixel_set(bits: u16, col: u32, row: u32) -> bool {
    let shift = (GLYPH_HEIGHT - 1 - row) * GLYPH_WIDTH + (GLYPH_WIDTH - 1 - col);
    bits & (1 << shift) != 0
}

/// Width of `text` in the same units as `scale` (world units per font pixel).
pub fn text_width(text: &str, scale: f32) -> f32 {
    text.chars().count() as f32 * GLYPH_ADVANCE as f32 * scale
}

/// Greedy word wrap. Explicit newlines always break; a single word wider than
/// `max_width` stays on its own line.
pub(crate) fn wrap_lines(text: &str, max_width: f32, scale: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if !line.is_empty() && text_width(&candidate, scale) > max_width {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// Draws `text` with its top-left corner at `(x, y)` screen pixels, each font
/// pixel covering `pixel_size` screen pixels.
pub(crate) fn draw_text(
    canvas: &mut Canvas<'_>,
    x: f32,
    y: f32,
    pixel_size: f32,
    text: &str,
    color: Rgba,
) {
    if pixel_size <= 0.0 {
        return;
    }
    let mut origin_x = x;
    for ch in text.chars() {
        let bits = glyph_or_fallback(ch);
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !glyph_pixel_set(bits, col, row) {
                    continue;
                }
                let left = origin_x + col as f32 * pixel_size;
                let top = y + row as f32 * pixel_size;
                canvas.fill_rect(
                    left.round() as i32,
                    top.round() as i32,
                    (left + pixel_size).round() as i32,
                    (top + pixel_size).round() as i32,
                    color,
                );
            }
        }
        origin_x += GLYPH_ADVANCE as f32 * pixel_size;
    }
}
