use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

#[derive(Debug, Error)]
enum SpriteLoadError {
    #[error("no asset root configured")]
    NoAssetRoot,
    #[error("invalid key: {0}")]
    InvalidKey(#[from] SpriteKeyError),
    #[error("open failed: {0}")]
    Open(#[source] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[source] image::ImageError),
}

pub(crate) struct LoadedSprite {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

pub(crate) fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    if let Some(character) = key
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '-')))
    {
        return Err(SpriteKeyError::InvalidCharacter { character });
    }
    Ok(())
}

/// Decoded sprites keyed by name. Failed loads are cached as `None` so a
/// missing file is probed and reported once, then drawn with its fallback.
#[derive(Default)]
pub(crate) struct SpriteCache {
    asset_root: Option<PathBuf>,
    sprites: HashMap<String, Option<LoadedSprite>>,
    warned_keys: HashSet<String>,
}

impl SpriteCache {
    pub(crate) fn new(asset_root: Option<PathBuf>) -> Self {
        Self {
            asset_root,
            ..Self::default()
        }
    }

    pub(crate) fn resolve(&mut self, key: &str) -> Option<&LoadedSprite> {
        if !self.sprites.contains_key(key) {
            let loaded = match self.load(key) {
                Ok(sprite) => Some(sprite),
                Err(error) => {
                    if self.warned_keys.insert(key.to_string()) {
                        warn!(sprite_key = key, error = %error, "sprite_load_failed_using_fallback");
                    }
                    None
                }
            };
            self.sprites.insert(key.to_string(), loaded);
        }
        self.sprites.get(key).and_then(Option::as_ref)
    }

    fn load(&self, key: &str) -> Result<LoadedSprite, SpriteLoadError> {
        let root = self.asset_root.as_deref().ok_or(SpriteLoadError::NoAssetRoot)?;
        let path = sprite_path(root, key)?;
        let decoded = ImageReader::open(&path)
            .map_err(SpriteLoadError::Open)?
            .decode()
            .map_err(SpriteLoadError::Decode)?;
        let image = decoded.to_rgba8();
        Ok(LoadedSprite {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }
}

fn sprite_path(asset_root: &Path, key: &str) -> Result<PathBuf, SpriteKeyError> {
    validate_sprite_key(key)?;
    Ok(asset_root.join("sprites").join(format!("{key}.png")))
}
