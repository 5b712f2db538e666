use crate::app::Vec2;

/// Uniform fit of the logical surface into the window, centered with
/// letterbox bars on the long axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Viewport {
    pub fn letterbox(window_size: (u32, u32), logical_size: (f32, f32)) -> Self {
        let (window_w, window_h) = (window_size.0 as f32, window_size.1 as f32);
        let (logical_w, logical_h) = logical_size;
        if logical_w <= 0.0 || logical_h <= 0.0 || window_w <= 0.0 || window_h <= 0.0 {
            return Self {
                scale: 1.0,
                offset_x: 0.0,
                offset_y: 0.0,
            };
        }

        let scale = (window_w / logical_w).min(window_h / logical_h);
        Self {
            scale,
            offset_x: (window_w - logical_w * scale) / 2.0,
            offset_y: (window_h - logical_h * scale) / 2.0,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2 {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2 {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }
}

pub fn screen_to_world_px(
    window_size: (u32, u32),
    logical_size: (f32, f32),
    screen_px: Vec2,
) -> Vec2 {
    Viewport::letterbox(window_size, logical_size).screen_to_world(screen_px)
}
