use super::draw_list::Rgba;

/// Borrowed RGBA8 frame with clipped, alpha-blended primitives.
pub(crate) struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub(crate) fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let Some(offset) = (y as usize)
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x as usize))
            .and_then(|pixel| pixel.checked_mul(4))
        else {
            return;
        };
        let Some(dst) = self.frame.get_mut(offset..offset + 4) else {
            return;
        };
        let blended = blend_over([dst[0], dst[1], dst[2], dst[3]], color);
        dst.copy_from_slice(&blended);
    }

    /// Fills the half-open pixel span `[x0, x1) x [y0, y1)`.
    pub(crate) fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        if color[3] == 0 {
            return;
        }
        let start_x = x0.max(0);
        let start_y = y0.max(0);
        let end_x = x1.min(self.width as i32);
        let end_y = y1.min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub(crate) fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 || color[3] == 0 {
            return;
        }
        let radius_sq = radius * radius;
        let min_y = (cy - radius).floor() as i32;
        let max_y = (cy + radius).ceil() as i32;
        let min_x = (cx - radius).floor() as i32;
        let max_x = (cx + radius).ceil() as i32;
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Nearest-neighbor blit of an RGBA8 image into `[x0, x1) x [y0, y1)`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn blit_scaled(
        &mut self,
        rgba: &[u8],
        src_width: u32,
        src_height: u32,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        opacity: f32,
    ) {
        let dest_w = x1 - x0;
        let dest_h = y1 - y0;
        if dest_w <= 0 || dest_h <= 0 || src_width == 0 || src_height == 0 {
            return;
        }
        let opacity = opacity.clamp(0.0, 1.0);
        for py in y0.max(0)..y1.min(self.height as i32) {
            let sy = ((py - y0) as i64 * src_height as i64 / dest_h as i64) as usize;
            for px in x0.max(0)..x1.min(self.width as i32) {
                let sx = ((px - x0) as i64 * src_width as i64 / dest_w as i64) as usize;
                let offset = (sy * src_width as usize + sx) * 4;
                let Some(src) = rgba.get(offset..offset + 4) else {
                    continue;
                };
                let alpha = (src[3] as f32 * opacity).round() as u8;
                self.blend_pixel(px, py, [src[0], src[1], src[2], alpha]);
            }
        }
    }
}

/// Source-over compositing of `src` onto `dst`.
pub(crate) fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    match src[3] {
        0 => dst,
        255 => src,
        alpha => {
            let a = alpha as u32;
            let inv = 255 - a;
            let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
            let out_alpha = (a + dst[3] as u32 * inv / 255).min(255) as u8;
            [
                mix(src[0], dst[0]),
                mix(src[1], dst[1]),
                mix(src[2], dst[2]),
                out_alpha,
            ]
        }
    }
}
