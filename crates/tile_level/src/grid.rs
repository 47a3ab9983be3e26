//! Immutable tile grid parsed from level text.
//!
//! Level text is one character per tile, one row per line:
//!
//! ```text
//! wwwwwwww
//! w s    w
//! w   ww w
//! w  e   w
//! wwwwwwww
//! ```
//!
//! `w` wall, `s` start, `e` end, `+` waypoint, `n` enemy, space empty.

use std::path::Path;

use bevy::math::{IVec2, Vec2};

use crate::coords::world_to_grid;
use crate::error::{LevelError, MalformedLevel};
use crate::tile::TileType;

/// Row-major grid of tile types.
///
/// Built once per level load and never mutated afterwards. Queries outside
/// the grid return [`TileType::Empty`].
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
  width: usize,
  height: usize,
  tile_size: f32,
  offset: Vec2,
  cells: Vec<TileType>,
  start: Option<IVec2>,
}

impl TileGrid {
  /// Reads and parses a level file.
  pub fn load(path: impl AsRef<Path>, tile_size: f32) -> Result<Self, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Unreadable {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&text, tile_size)
  }

  /// Parses level text.
  ///
  /// The first row fixes the width and every other row must match it, which
  /// also guarantees `width * height` cells. A trailing newline is optional and
  /// `\r\n` line endings are accepted.
  pub fn parse(text: &str, tile_size: f32) -> Result<Self, LevelError> {
    let mut rows: Vec<&str> = text
      .split('\n')
      .map(|row| row.strip_suffix('\r').unwrap_or(row))
      .collect();
    if rows.last().is_some_and(|row| row.is_empty()) {
      rows.pop();
    }

    let width = rows.first().map_or(0, |row| row.chars().count());
    if width == 0 {
      return Err(MalformedLevel::Empty.into());
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    let mut start = None;

    for (y, row) in rows.iter().enumerate() {
      let mut found = 0;
      for (x, c) in row.chars().enumerate() {
        let tile = TileType::from_char(c).ok_or(LevelError::UnrecognizedTile {
          character: c,
          row: y,
          column: x,
        })?;
        if tile == TileType::Start {
          start = Some(IVec2::new(x as i32, y as i32));
        }
        cells.push(tile);
        found += 1;
      }

      if found != width {
        return Err(
          MalformedLevel::RaggedRow {
            row: y,
            expected: width,
            found,
          }
          .into(),
        );
      }
    }

    let height = rows.len();

    log::debug!("parsed {width}x{height} level grid");

    Ok(Self {
      width,
      height,
      tile_size,
      offset: Vec2::ZERO,
      cells,
      start,
    })
  }

  /// Sets the world offset subtracted by [`Self::tile_at_world`].
  ///
  /// Only world-to-grid lookups see the offset. Tile positions, the start
  /// position and collision contours stay at `grid * tile_size`.
  pub fn with_offset(mut self, offset: Vec2) -> Self {
    self.offset = offset;
    self
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  /// World units per cell edge.
  pub fn tile_size(&self) -> f32 {
    self.tile_size
  }

  pub fn offset(&self) -> Vec2 {
    self.offset
  }

  /// Whether `pos` lies inside `[0, width) x [0, height)`.
  pub fn contains(&self, pos: IVec2) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
  }

  /// Tile at a grid coordinate, [`TileType::Empty`] when out of bounds.
  pub fn tile_at(&self, pos: IVec2) -> TileType {
    if !self.contains(pos) {
      return TileType::Empty;
    }
    self.cells[pos.y as usize * self.width + pos.x as usize]
  }

  /// Tile under a world position.
  pub fn tile_at_world(&self, world: Vec2) -> TileType {
    let local = world - self.offset;
    if local.x < 0.0 || local.y < 0.0 {
      return TileType::Empty;
    }
    self.tile_at(world_to_grid(local, self.tile_size))
  }

  /// World position of a cell's top-left corner, `pos * tile_size`.
  pub fn tile_world_pos(&self, pos: IVec2) -> Vec2 {
    pos.as_vec2() * self.tile_size
  }

  /// World top-left corner of the start tile, if the level has one.
  ///
  /// With several start tiles the last one in row-major order wins.
  pub fn start_position(&self) -> Option<Vec2> {
    self.start.map(|pos| self.tile_world_pos(pos))
  }

  /// Grid coordinate of the start tile.
  pub fn start_cell(&self) -> Option<IVec2> {
    self.start
  }

  /// All coordinates holding `tile_type`, in row-major order.
  pub fn find_tiles(&self, tile_type: TileType) -> Vec<IVec2> {
    self
      .iter()
      .filter(|&(_, tile)| tile == tile_type)
      .map(|(pos, _)| pos)
      .collect()
  }

  /// Iterates `(coordinate, tile)` pairs in row-major order.
  pub fn iter(&self) -> impl Iterator<Item = (IVec2, TileType)> + '_ {
    let width = self.width;
    self.cells.iter().enumerate().map(move |(i, &tile)| {
      let pos = IVec2::new((i % width) as i32, (i / width) as i32);
      (pos, tile)
    })
  }

  /// Renders the grid back to level text, one newline-terminated row each.
  pub fn to_text(&self) -> String {
    let mut text = String::with_capacity((self.width + 1) * self.height);
    for row in self.cells.chunks(self.width) {
      text.extend(row.iter().map(|tile| tile.symbol()));
      text.push('\n');
    }
    text
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn crlf_and_missing_final_newline() {
    let grid = TileGrid::parse("ww\r\nw \r\nww", 10.0).unwrap();
    assert_eq!((grid.width(), grid.height()), (2, 3));
    assert_eq!(grid.tile_at(IVec2::new(1, 1)), TileType::Empty);
  }

  #[test]
  fn text_round_trip() {
    let text = "wsw\n+ne\n";
    let grid = TileGrid::parse(text, 10.0).unwrap();
    assert_eq!(grid.to_text(), text);
  }

  #[test]
  fn offset_only_shifts_world_lookups() {
    let grid = TileGrid::parse("w \n", 10.0)
      .unwrap()
      .with_offset(Vec2::new(100.0, 0.0));
    assert_eq!(grid.tile_at_world(Vec2::new(105.0, 5.0)), TileType::Wall);
    assert_eq!(grid.tile_at_world(Vec2::new(5.0, 5.0)), TileType::Empty);
    assert_eq!(grid.tile_world_pos(IVec2::new(1, 0)), Vec2::new(10.0, 0.0));
  }
}
