use std::collections::HashSet;
use std::f32::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use engine::{
    screen_to_world_px, text_width, with_opacity, DrawList, InputAction, InputSnapshot, Rect,
    Rgba, Scene, SceneCommand, Vec2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const GAME_WIDTH: f32 = 800.0;
const GAME_HEIGHT: f32 = 600.0;
const TOAST_DURATION_TICKS: u32 = 180;
const TOAST_FADE_TICKS: u32 = 30;
const MODAL_BOX: Rect = Rect::new(60.0, 300.0, 680.0, 240.0);
const LETTER_BOX: Rect = Rect::new(60.0, 260.0, 680.0, 300.0);
const PETAL_COUNT: usize = 18;
const PETAL_OPACITY: f32 = 0.55;

include!("types.rs");
include!("world.rs");
include!("progression.rs");
include!("petals.rs");
include!("draw.rs");
include!("scene_impl.rs");

pub(crate) fn build_scene(layout: WorldLayout) -> Box<dyn Scene> {
    Box::new(GardenScene::new(layout, StdRng::from_entropy()))
}
