//! Tile sprites.

use std::collections::HashMap;

use bevy::color::Alpha;
use bevy::prelude::*;

use crate::config::TileColorEntry;
use crate::coords::PhysicsSpace;
use crate::grid::TileGrid;
use crate::tile::TileType;

/// Fill colour per tile type. Types without an entry are transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct TileColors {
  colors: HashMap<TileType, Color>,
}

impl Default for TileColors {
  fn default() -> Self {
    let mut colors = HashMap::new();
    colors.insert(TileType::Wall, Color::WHITE);
    colors.insert(TileType::End, Color::srgb(1.0, 0.0, 0.0));
    Self { colors }
  }
}

impl TileColors {
  /// Defaults with config overrides applied in order.
  pub fn from_entries(entries: &[TileColorEntry]) -> Self {
    let mut colors = Self::default();
    for entry in entries {
      let [r, g, b, a] = entry.color;
      colors.set(entry.tile, Color::srgba(r, g, b, a));
    }
    colors
  }

  pub fn get(&self, tile: TileType) -> Color {
    self.colors.get(&tile).copied().unwrap_or(Color::NONE)
  }

  pub fn set(&mut self, tile: TileType, color: Color) {
    self.colors.insert(tile, color);
  }
}

/// Marker for tile sprite entities.
#[derive(Component, Clone, Copy, Debug)]
pub struct TileSprite {
  pub pos: IVec2,
  pub tile: TileType,
}

/// Spawns one sprite per visible tile and returns the entities.
///
/// Sprites are centred on their cell in Bevy world space (pixels, Y-up), the
/// same space platform colliders use.
pub fn spawn_tile_sprites(
  commands: &mut Commands,
  grid: &TileGrid,
  colors: &TileColors,
  space: PhysicsSpace,
) -> Vec<Entity> {
  let size = grid.tile_size();
  let half = Vec2::splat(size * 0.5);

  grid
    .iter()
    .filter_map(|(pos, tile)| {
      let color = colors.get(tile);
      if color.alpha() <= 0.0 {
        return None;
      }
      let center = space.invert_height(grid.tile_world_pos(pos) + half);
      let entity = commands
        .spawn((
          TileSprite { pos, tile },
          Sprite {
            color,
            custom_size: Some(Vec2::splat(size)),
            ..default()
          },
          Transform::from_xyz(center.x, center.y, 0.0),
        ))
        .id();
      Some(entity)
    })
    .collect()
}
