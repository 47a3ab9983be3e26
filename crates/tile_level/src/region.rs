//! Partitioning same-typed tiles into connected regions.
//!
//! Connectivity is directional rather than plain 4-connectivity:
//! - a tile always extends left and right into member neighbors
//! - it extends up or down only while its surroundings are rectangular,
//!   i.e. the left and right columns agree with the row being entered
//! - a step taken horizontally inherits vertical extension only if the
//!   tile it left had a fully symmetric neighborhood
//!
//! The effect is that regions come out as stacked runs that never bridge
//! through a single corner, which keeps their boundaries axis-aligned and
//! close to convex. Diagonal-only contact never joins two tiles.

use std::collections::HashSet;

use bevy::math::IVec2;

use crate::coords::NEIGHBOR_OFFSETS;
use crate::grid::TileGrid;
use crate::tile::TileType;

const TOP_LEFT: usize = 0;
const TOP: usize = 1;
const TOP_RIGHT: usize = 2;
const RIGHT: usize = 3;
const BOTTOM_RIGHT: usize = 4;
const BOTTOM: usize = 5;
const BOTTOM_LEFT: usize = 6;
const LEFT: usize = 7;

/// Membership of the 8 cells surrounding a tile.
///
/// Sampled through an adjacency predicate so the same gating rules apply
/// whether membership means "same type and still unassigned" (partitioning)
/// or "inside this region" (contour synthesis).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
  cells: [bool; 8],
}

impl Neighborhood {
  /// Samples the neighbors of `pos` in [`NEIGHBOR_OFFSETS`] order.
  pub fn sample(pos: IVec2, is_member: impl Fn(IVec2) -> bool) -> Self {
    Self {
      cells: NEIGHBOR_OFFSETS.map(|offset| is_member(pos + offset)),
    }
  }

  /// Builds a neighborhood from raw flags, clockwise from the top-left.
  pub const fn from_flags(cells: [bool; 8]) -> Self {
    Self { cells }
  }

  pub fn top_left(&self) -> bool {
    self.cells[TOP_LEFT]
  }

  pub fn top(&self) -> bool {
    self.cells[TOP]
  }

  pub fn top_right(&self) -> bool {
    self.cells[TOP_RIGHT]
  }

  pub fn right(&self) -> bool {
    self.cells[RIGHT]
  }

  pub fn bottom_right(&self) -> bool {
    self.cells[BOTTOM_RIGHT]
  }

  pub fn bottom(&self) -> bool {
    self.cells[BOTTOM]
  }

  pub fn bottom_left(&self) -> bool {
    self.cells[BOTTOM_LEFT]
  }

  pub fn left(&self) -> bool {
    self.cells[LEFT]
  }

  /// Whether a horizontal step out of this tile may still extend vertically.
  ///
  /// True when each side column matches both of its diagonals, so the tile
  /// sits inside a rectangular patch rather than on a zig-zag edge.
  pub fn unlocks_vertical(&self) -> bool {
    self.right() == self.bottom_right()
      && self.left() == self.bottom_left()
      && self.right() == self.top_right()
      && self.left() == self.top_left()
  }

  /// Whether the tile below may join the region.
  pub fn extends_down(&self) -> bool {
    self.right() == self.bottom_right() && self.left() == self.bottom_left() && self.bottom()
  }

  /// Whether the tile above may join the region.
  pub fn extends_up(&self) -> bool {
    self.right() == self.top_right() && self.left() == self.top_left() && self.top()
  }
}

/// A set of same-typed tiles connected under the propagation rule.
#[derive(Clone, Debug)]
pub struct Region {
  tile_type: TileType,
  tiles: Vec<IVec2>,
  members: HashSet<IVec2>,
}

impl Region {
  /// Builds a region from tiles in visiting order.
  pub fn new(tile_type: TileType, tiles: Vec<IVec2>) -> Self {
    let members = tiles.iter().copied().collect();
    Self {
      tile_type,
      tiles,
      members,
    }
  }

  pub fn tile_type(&self) -> TileType {
    self.tile_type
  }

  /// Tiles in the order propagation reached them. The seed comes first.
  pub fn tiles(&self) -> &[IVec2] {
    &self.tiles
  }

  pub fn contains(&self, pos: IVec2) -> bool {
    self.members.contains(&pos)
  }

  pub fn len(&self) -> usize {
    self.tiles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tiles.is_empty()
  }

  /// Inclusive min and max grid coordinates, `None` for an empty region.
  pub fn bounds(&self) -> Option<(IVec2, IVec2)> {
    let first = *self.tiles.first()?;
    Some(
      self
        .tiles
        .iter()
        .fold((first, first), |(min, max), &pos| (min.min(pos), max.max(pos))),
    )
  }
}

/// Grows a region from `seed` through tiles accepted by `is_member`.
///
/// Visits tiles in the same preorder as recursing right, left, down, then up,
/// with a tile counted on first arrival. The vertical flag a tile arrives
/// with is therefore fixed by whichever path reaches it first.
pub fn propagate(seed: IVec2, is_member: impl Fn(IVec2) -> bool) -> Vec<IVec2> {
  let mut visited = HashSet::new();
  let mut order = Vec::new();
  let mut stack = vec![(seed, true)];

  while let Some((pos, vertical)) = stack.pop() {
    if !visited.insert(pos) {
      continue;
    }
    order.push(pos);

    let around = Neighborhood::sample(pos, &is_member);
    let unlocked = around.unlocks_vertical();

    // Pushed in reverse so the stack pops right, left, down, up.
    if vertical && around.extends_up() {
      stack.push((pos + NEIGHBOR_OFFSETS[TOP], true));
    }
    if vertical && around.extends_down() {
      stack.push((pos + NEIGHBOR_OFFSETS[BOTTOM], true));
    }
    if around.left() {
      stack.push((pos + NEIGHBOR_OFFSETS[LEFT], unlocked));
    }
    if around.right() {
      stack.push((pos + NEIGHBOR_OFFSETS[RIGHT], unlocked));
    }
  }

  order
}

/// Splits every tile of `tile_type` into regions.
///
/// Each coordinate lands in exactly one region. Seeds are taken in row-major
/// order from the tiles not yet assigned, and only unassigned tiles count as
/// members while a region grows.
pub fn partition(grid: &TileGrid, tile_type: TileType) -> Vec<Region> {
  let candidates = grid.find_tiles(tile_type);
  let mut remaining: HashSet<IVec2> = candidates.iter().copied().collect();
  let mut regions = Vec::new();

  for &seed in &candidates {
    if !remaining.contains(&seed) {
      continue;
    }

    let tiles = propagate(seed, |pos| remaining.contains(&pos));
    for pos in &tiles {
      remaining.remove(pos);
    }
    regions.push(Region::new(tile_type, tiles));
  }

  log::debug!(
    "partitioned {} {tile_type} tiles into {} regions",
    candidates.len(),
    regions.len()
  );

  regions
}
