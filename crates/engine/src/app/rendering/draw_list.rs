use crate::app::{Rect, Vec2};

pub type Rgba = [u8; 4];

/// What to draw in place of a sprite whose image is unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteFallback {
    /// Fill the sprite's destination rect.
    Fill(Rgba),
    /// Fill a circle centered on the destination rect.
    Circle { radius: f32, color: Rgba },
}

/// One draw call in world units. The renderer maps world units through the
/// letterbox viewport, so scenes never see window pixels here.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    Sprite {
        key: String,
        rect: Rect,
        opacity: f32,
        fallback: Option<SpriteFallback>,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Text {
        text: String,
        position: Vec2,
        scale: f32,
        color: Rgba,
    },
    WrappedText {
        text: String,
        position: Vec2,
        scale: f32,
        max_width: f32,
        line_height: f32,
        color: Rgba,
    },
}

#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn sprite(&mut self, key: &str, rect: Rect, opacity: f32, fallback: Option<Rgba>) {
        self.commands.push(DrawCommand::Sprite {
            key: key.to_string(),
            rect,
            opacity,
            fallback: fallback.map(SpriteFallback::Fill),
        });
    }

    pub fn sprite_or_circle(&mut self, key: &str, rect: Rect, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Sprite {
            key: key.to_string(),
            rect,
            opacity: 1.0,
            fallback: Some(SpriteFallback::Circle { radius, color }),
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, position: Vec2, scale: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            position,
            scale,
            color,
        });
    }

    pub fn wrapped_text(
        &mut self,
        text: impl Into<String>,
        position: Vec2,
        scale: f32,
        max_width: f32,
        line_height: f32,
        color: Rgba,
    ) {
        self.commands.push(DrawCommand::WrappedText {
            text: text.into(),
            position,
            scale,
            max_width,
            line_height,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Scales the alpha channel of `color` by `factor` (clamped to 0..=1).
pub fn with_opacity(color: Rgba, factor: f32) -> Rgba {
    let factor = if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    [
        color[0],
        color[1],
        color[2],
        (color[3] as f32 * factor).round() as u8,
    ]
}
