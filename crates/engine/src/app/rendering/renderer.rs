use std::path::PathBuf;
use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::draw_list::{with_opacity, DrawCommand, DrawList, SpriteFallback};
use super::raster::Canvas;
use super::sprites::SpriteCache;
use super::text::{draw_text, wrap_lines};
use super::Viewport;
use crate::app::{Rect, Vec2};

const LETTERBOX_COLOR: [u8; 4] = [12, 10, 14, 255];

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    window_size: (u32, u32),
    logical_size: (f32, f32),
    sprites: SpriteCache,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        logical_size: (f32, f32),
        asset_root: Option<PathBuf>,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            window_size: (size.width, size.height),
            logical_size,
            sprites: SpriteCache::new(asset_root),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.window_size = (width, height);
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width.max(1), height.max(1), window);
        Pixels::new(width.max(1), height.max(1), surface)
    }

    pub fn render(&mut self, draw_list: &DrawList) -> Result<(), Error> {
        let (width, height) = self.window_size;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let viewport = Viewport::letterbox(self.window_size, self.logical_size);
        let mut canvas = Canvas::new(self.pixels.frame_mut(), width, height);
        canvas.clear(LETTERBOX_COLOR);
        rasterize(&mut canvas, &viewport, &mut self.sprites, draw_list);
        self.pixels.render()
    }
}

fn rasterize(
    canvas: &mut Canvas<'_>,
    viewport: &Viewport,
    sprites: &mut SpriteCache,
    draw_list: &DrawList,
) {
    for command in draw_list.commands() {
        match command {
            DrawCommand::FillRect { rect, color } => {
                let (x0, y0, x1, y1) = screen_span(viewport, *rect);
                canvas.fill_rect(x0, y0, x1, y1, *color);
            }
            DrawCommand::Sprite {
                key,
                rect,
                opacity,
                fallback,
            } => {
                let (x0, y0, x1, y1) = screen_span(viewport, *rect);
                match sprites.resolve(key) {
                    Some(sprite) => canvas.blit_scaled(
                        &sprite.rgba,
                        sprite.width,
                        sprite.height,
                        x0,
                        y0,
                        x1,
                        y1,
                        *opacity,
                    ),
                    None => match fallback {
                        Some(SpriteFallback::Fill(color)) => {
                            canvas.fill_rect(x0, y0, x1, y1, with_opacity(*color, *opacity));
                        }
                        Some(SpriteFallback::Circle { radius, color }) => {
                            let center = viewport.world_to_screen(rect.center());
                            canvas.fill_circle(
                                center.x,
                                center.y,
                                radius * viewport.scale,
                                with_opacity(*color, *opacity),
                            );
                        }
                        None => {}
                    },
                }
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                let screen = viewport.world_to_screen(*center);
                canvas.fill_circle(screen.x, screen.y, radius * viewport.scale, *color);
            }
            DrawCommand::Text {
                text,
                position,
                scale,
                color,
            } => {
                let screen = viewport.world_to_screen(*position);
                draw_text(canvas, screen.x, screen.y, scale * viewport.scale, text, *color);
            }
            DrawCommand::WrappedText {
                text,
                position,
                scale,
                max_width,
                line_height,
                color,
            } => {
                for (index, line) in wrap_lines(text, *max_width, *scale).iter().enumerate() {
                    let line_position = Vec2 {
                        x: position.x,
                        y: position.y + index as f32 * line_height,
                    };
                    let screen = viewport.world_to_screen(line_position);
                    draw_text(canvas, screen.x, screen.y, scale * viewport.scale, line, *color);
                }
            }
        }
    }
}

fn screen_span(viewport: &Viewport, rect: Rect) -> (i32, i32, i32, i32) {
    let top_left = viewport.world_to_screen(Vec2 {
        x: rect.x,
        y: rect.y,
    });
    let bottom_right = viewport.world_to_screen(Vec2 {
        x: rect.right(),
        y: rect.bottom(),
    });
    (
        top_left.x.round() as i32,
        top_left.y.round() as i32,
        bottom_right.x.round() as i32,
        bottom_right.y.round() as i32,
    )
}
