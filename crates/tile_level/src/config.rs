//! Level configuration loaded from TOML.
//!
//! ```toml
//! level_path = "assets/levels/level_1.txt"
//! tile_size = 40.0
//! collision_types = ["wall"]
//! polygon = "angular"
//!
//! [physics]
//! pixels_per_meter = 30.0
//! viewport_height = 700.0
//!
//! [material]
//! friction = 40.0
//! restitution = 0.2
//!
//! [[colors]]
//! tile = "end"
//! color = "#ff0000"
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fmt, io};

use bevy::prelude::Resource;
use serde::{Deserialize, Deserializer, de};

use crate::contour::PolygonStrategy;
use crate::coords::PhysicsSpace;
use crate::tile::TileType;

/// Default world units per tile.
pub const TILE_SIZE: f32 = 40.0;

/// Friction and restitution applied to every edge of a platform chain.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceMaterial {
  pub friction: f32,
  pub restitution: f32,
}

impl Default for SurfaceMaterial {
  fn default() -> Self {
    Self {
      friction: 40.0,
      restitution: 0.2,
    }
  }
}

/// Colour override for one tile type.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct TileColorEntry {
  pub tile: TileType,
  /// sRGBA components in `0.0..=1.0`.
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 4],
}

/// Settings for loading a level and building its collision.
#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
  /// Level loaded at startup, if any.
  pub level_path: Option<PathBuf>,
  /// World units per tile.
  pub tile_size: f32,
  pub physics: PhysicsSpace,
  pub material: SurfaceMaterial,
  /// Tile types that get static collision bodies.
  pub collision_types: Vec<TileType>,
  pub polygon: PolygonStrategy,
  pub colors: Vec<TileColorEntry>,
}

impl Default for LevelConfig {
  fn default() -> Self {
    Self {
      level_path: None,
      tile_size: TILE_SIZE,
      physics: PhysicsSpace::default(),
      material: SurfaceMaterial::default(),
      collision_types: vec![TileType::Wall],
      polygon: PolygonStrategy::default(),
      colors: Vec::new(),
    }
  }
}

impl LevelConfig {
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(text)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&text)
  }

  /// Sets the startup level.
  pub fn with_level(mut self, path: impl Into<PathBuf>) -> Self {
    self.level_path = Some(path.into());
    self
  }

  pub fn with_polygon(mut self, polygon: PolygonStrategy) -> Self {
    self.polygon = polygon;
    self
  }
}

/// Error reading a level config.
#[derive(Debug)]
pub enum ConfigError {
  Io { path: PathBuf, source: io::Error },
  Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
      Self::Parse(e) => write!(f, "failed to parse config: {e}"),
    }
  }
}

impl Error for ConfigError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse(e) => Some(e),
    }
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

/// Parses `#rrggbb` or `#rrggbbaa` into sRGBA components. Alpha defaults to
/// opaque.
pub fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 4], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 && s.len() != 8 {
    return Err(de::Error::custom("hex color must be 6 or 8 characters"));
  }
  let channel = |i: usize| -> Result<f32, D::Error> {
    let byte = s
      .get(i..i + 2)
      .ok_or_else(|| <D::Error as de::Error>::custom("hex color must be ASCII"))?;
    let value = u8::from_str_radix(byte, 16).map_err(<D::Error as de::Error>::custom)?;
    Ok(value as f32 / 255.0)
  };
  let alpha = if s.len() == 8 { channel(6)? } else { 1.0 };
  Ok([channel(0)?, channel(2)?, channel(4)?, alpha])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let config = LevelConfig::from_toml_str("").unwrap();
    assert_eq!(config, LevelConfig::default());
    assert_eq!(config.collision_types, vec![TileType::Wall]);
  }

  #[test]
  fn hex_colors_parse() {
    let config = LevelConfig::from_toml_str(
      r##"
      [[colors]]
      tile = "end"
      color = "#ff000080"
      "##,
    )
    .unwrap();
    let entry = config.colors[0];
    assert_eq!(entry.tile, TileType::End);
    assert_eq!(entry.color[0], 1.0);
    assert!((entry.color[3] - 128.0 / 255.0).abs() < 1e-6);
  }

  #[test]
  fn multibyte_hex_is_rejected() {
    // Six bytes, but not six hex digits.
    let err = LevelConfig::from_toml_str(
      r##"
      [[colors]]
      tile = "wall"
      color = "#€€"
      "##,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn bad_hex_is_rejected() {
    let err = LevelConfig::from_toml_str(
      r##"
      [[colors]]
      tile = "wall"
      color = "#fff"
      "##,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }
}
