mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{
    screen_to_world_px, text_width, with_opacity, DrawCommand, DrawList, Rgba, SpriteFallback,
};
pub use scene::{InputSnapshot, Rect, Scene, SceneCommand, Vec2};
