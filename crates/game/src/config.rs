use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use tile_level::config::deserialize_hex_color;
use tile_level::{ConfigError, LevelConfig};

/// Directory the default config and level paths resolve against.
pub const ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

#[derive(Resource, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  #[serde(default)]
  pub ball: BallConfig,
  #[serde(default)]
  pub debug: DebugConfig,
  #[serde(default)]
  pub level: LevelConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub clear_color: [f32; 4],
}

/// Dynamic test body dropped at the start tile.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct BallConfig {
  pub radius: f32,
  pub restitution: f32,
  pub friction: f32,
}

impl Default for BallConfig {
  fn default() -> Self {
    Self {
      radius: 12.0,
      restitution: 0.3,
      friction: 0.5,
    }
  }
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(default)]
pub struct DebugConfig {
  /// Draw collider outlines.
  pub colliders: bool,
}

impl GameConfig {
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let mut config: GameConfig = toml::from_str(&text)?;
    config.level.level_path = config.level.level_path.map(resolve_asset_path);
    Ok(config)
  }
}

/// Relative paths that do not exist from the working directory are looked up
/// under [`ASSETS_DIR`].
pub fn resolve_asset_path(path: PathBuf) -> PathBuf {
  if path.is_absolute() || path.exists() {
    return path;
  }
  Path::new(ASSETS_DIR).join(path)
}

#[cfg(test)]
mod tests {
  use tile_level::{PolygonStrategy, TileType};

  use super::*;

  const CONFIG: &str = r##"
[window]
width = 1000
height = 700
title = "Tiles"

[camera]
viewport_width = 1000.0
viewport_height = 700.0
clear_color = "#102030"

[level]
level_path = "levels/level_1.txt"
collision_types = ["wall", "end"]
polygon = "trace"
"##;

  #[test]
  fn parses_game_config() {
    let config: GameConfig = toml::from_str(CONFIG).unwrap();
    assert_eq!(config.window.width, 1000);
    assert!((config.camera.clear_color[0] - 16.0 / 255.0).abs() < 1e-6);
    assert_eq!(config.level.collision_types, vec![TileType::Wall, TileType::End]);
    assert_eq!(config.level.polygon, PolygonStrategy::Trace);
    assert!(!config.debug.colliders);
  }

  #[test]
  fn multibyte_clear_color_is_an_error() {
    let text = CONFIG.replace("#102030", "#€€");
    assert!(toml::from_str::<GameConfig>(&text).is_err());
  }

  #[test]
  fn level_path_resolves_under_assets() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("game.config.toml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = GameConfig::load(&path).unwrap();
    let level = config.level.level_path.unwrap();
    assert!(level.starts_with(ASSETS_DIR) || level.exists());
    assert!(level.ends_with("levels/level_1.txt"));
  }

  #[test]
  fn bundled_config_loads() {
    let config = GameConfig::load(Path::new(ASSETS_DIR).join("config/game.config.toml")).unwrap();
    assert!(config.level.level_path.unwrap().exists());
  }
}
