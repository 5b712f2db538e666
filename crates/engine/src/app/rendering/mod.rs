mod draw_list;
mod raster;
mod renderer;
mod sprites;
mod text;
mod transform;

pub use draw_list::{with_opacity, DrawCommand, DrawList, Rgba, SpriteFallback};
pub(crate) use renderer::Renderer;
pub use text::text_width;
pub use transform::screen_to_world_px;
pub(crate) use transform::Viewport;
