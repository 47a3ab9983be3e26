//! The active level: grid, colours and collision contours.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::config::LevelConfig;
use crate::contour::{Contour, PolygonBuilder, synthesize};
use crate::coords::PhysicsSpace;
use crate::error::{LevelError, MalformedLevel};
use crate::grid::TileGrid;
use crate::region::{Region, partition};
use crate::render::TileColors;
use crate::tile::TileType;

/// A collision region together with its contour.
#[derive(Clone, Debug)]
pub struct RegionShape {
  /// Index of the region within its tile type's partition.
  pub index: usize,
  pub region: Region,
  pub contour: Contour,
}

/// Everything derived from one level file.
///
/// Built in full before it is inserted, so a level that fails any check never
/// replaces the one currently running.
#[derive(Resource, Clone, Debug)]
pub struct LevelState {
  grid: TileGrid,
  colors: TileColors,
  space: PhysicsSpace,
  shapes: Vec<RegionShape>,
  source: Option<PathBuf>,
}

impl LevelState {
  /// Reads a level file and builds its state.
  pub fn load(path: impl AsRef<Path>, config: &LevelConfig) -> Result<Self, LevelError> {
    let path = path.as_ref();
    let grid = TileGrid::load(path, config.tile_size)?;
    let mut state = Self::build(grid, config)?;
    state.source = Some(path.to_path_buf());
    Ok(state)
  }

  /// Partitions every collision type and synthesizes a contour per region.
  pub fn build(grid: TileGrid, config: &LevelConfig) -> Result<Self, LevelError> {
    Self::build_with(grid, config, config.polygon.builder())
  }

  /// Like [`Self::build`], with an explicit polygon builder in place of
  /// `config.polygon`.
  ///
  /// A region whose contour comes out degenerate fails the whole level with
  /// [`MalformedLevel::DegenerateRegion`].
  pub fn build_with(
    grid: TileGrid,
    config: &LevelConfig,
    builder: &dyn PolygonBuilder,
  ) -> Result<Self, LevelError> {
    let mut shapes = Vec::new();

    for &tile_type in &config.collision_types {
      for (index, region) in partition(&grid, tile_type).into_iter().enumerate() {
        let contour = synthesize(&grid, &region, config.physics, builder).map_err(|source| {
          MalformedLevel::DegenerateRegion {
            tile_type,
            region: index,
            source,
          }
        })?;
        shapes.push(RegionShape {
          index,
          region,
          contour,
        });
      }
    }

    Ok(Self {
      grid,
      colors: TileColors::from_entries(&config.colors),
      space: config.physics,
      shapes,
      source: None,
    })
  }

  pub fn grid(&self) -> &TileGrid {
    &self.grid
  }

  pub fn space(&self) -> PhysicsSpace {
    self.space
  }

  /// File the level came from, if it was loaded from disk.
  pub fn source(&self) -> Option<&Path> {
    self.source.as_deref()
  }

  pub fn tile_at(&self, pos: IVec2) -> TileType {
    self.grid.tile_at(pos)
  }

  pub fn tile_at_world(&self, world: Vec2) -> TileType {
    self.grid.tile_at_world(world)
  }

  pub fn tile_world_pos(&self, pos: IVec2) -> Vec2 {
    self.grid.tile_world_pos(pos)
  }

  pub fn find_tiles(&self, tile_type: TileType) -> Vec<IVec2> {
    self.grid.find_tiles(tile_type)
  }

  /// Regions of any tile type, recomputed on each call.
  pub fn groups(&self, tile_type: TileType) -> Vec<Region> {
    partition(&self.grid, tile_type)
  }

  pub fn start_position(&self) -> Option<Vec2> {
    self.grid.start_position()
  }

  pub fn color(&self, tile_type: TileType) -> Color {
    self.colors.get(tile_type)
  }

  pub fn set_color(&mut self, tile_type: TileType, color: Color) {
    self.colors.set(tile_type, color);
  }

  pub fn colors(&self) -> &TileColors {
    &self.colors
  }

  /// Collision regions and contours, grouped by tile type in config order.
  pub fn shapes(&self) -> &[RegionShape] {
    &self.shapes
  }

  pub fn contours(&self) -> impl Iterator<Item = &Contour> {
    self.shapes.iter().map(|shape| &shape.contour)
  }
}
