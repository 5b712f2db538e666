use std::env;
use std::path::PathBuf;

use engine::{resolve_app_paths, AppPaths, LoopConfig, Scene};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, LayoutError, WorldLayout};

const LAYOUT_ENV_VAR: &str = "GARDEN_GATE_LAYOUT";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error("failed to load world layout: {0}")]
    Layout(#[from] LayoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LayoutSource {
    Override(PathBuf),
    Project(PathBuf),
    Builtin,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Garden Gate Startup ===");

    let paths = match resolve_app_paths() {
        Ok(paths) => {
            info!(root = %paths.root.display(), "app_paths_resolved");
            Some(paths)
        }
        Err(error) => {
            warn!(error = %error, "app_paths_unresolved_using_builtin_assets");
            None
        }
    };

    let layout_override = env::var_os(LAYOUT_ENV_VAR).map(PathBuf::from);
    let source = select_layout_source(layout_override, paths.as_ref());
    let layout = load_layout(&source)?;
    let config = LoopConfig {
        asset_root: paths.map(|paths| paths.assets_dir),
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        config,
        scene: gameplay::build_scene(layout),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// An explicit override wins; otherwise the project's layout file if one
/// exists; otherwise the compiled-in layout.
fn select_layout_source(env_override: Option<PathBuf>, paths: Option<&AppPaths>) -> LayoutSource {
    if let Some(path) = env_override.filter(|path| !path.as_os_str().is_empty()) {
        return LayoutSource::Override(path);
    }
    match paths.map(|paths| paths.layout_path.as_path()) {
        Some(path) if path.is_file() => LayoutSource::Project(path.to_path_buf()),
        _ => LayoutSource::Builtin,
    }
}

fn load_layout(source: &LayoutSource) -> Result<WorldLayout, LayoutError> {
    match source {
        LayoutSource::Override(path) | LayoutSource::Project(path) => {
            let layout = gameplay::load_layout_file(path)?;
            info!(source = %path.display(), "layout_loaded");
            Ok(layout)
        }
        LayoutSource::Builtin => {
            info!(source = "builtin", "layout_loaded");
            Ok(WorldLayout::builtin())
        }
    }
}
