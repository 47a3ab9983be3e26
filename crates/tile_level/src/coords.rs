//! Coordinate spaces and conversions.
//!
//! Three spaces are in play:
//! - grid: integer cell coordinates ([`IVec2`]), `(0, 0)` is the top-left cell
//! - world: pixels, Y-down, `grid * tile_size` is a cell's top-left corner
//! - physics: meters, Y-up, see [`PhysicsSpace`]

use bevy::math::{IVec2, Vec2};
use serde::Deserialize;

/// Default pixels per physics meter.
pub const PIXELS_PER_METER: f32 = 30.0;

/// Default viewport height in pixels, used for the vertical inversion.
pub const VIEWPORT_HEIGHT: f32 = 700.0;

/// Neighbor offsets around a cell, clockwise from the top-left.
///
/// Indices: 0 top-left, 1 top, 2 top-right, 3 right, 4 bottom-right,
/// 5 bottom, 6 bottom-left, 7 left. Y grows downward.
pub const NEIGHBOR_OFFSETS: [IVec2; 8] = [
  IVec2::new(-1, -1),
  IVec2::new(0, -1),
  IVec2::new(1, -1),
  IVec2::new(1, 0),
  IVec2::new(1, 1),
  IVec2::new(0, 1),
  IVec2::new(-1, 1),
  IVec2::new(-1, 0),
];

/// Mapping between world pixels (Y-down) and physics meters (Y-up).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsSpace {
  /// Pixels per physics meter.
  pub pixels_per_meter: f32,
  /// Height of the viewport in pixels; world Y is flipped around it.
  pub viewport_height: f32,
}

impl Default for PhysicsSpace {
  fn default() -> Self {
    Self {
      pixels_per_meter: PIXELS_PER_METER,
      viewport_height: VIEWPORT_HEIGHT,
    }
  }
}

impl PhysicsSpace {
  pub const fn new(pixels_per_meter: f32, viewport_height: f32) -> Self {
    Self {
      pixels_per_meter,
      viewport_height,
    }
  }

  /// Flips a world position between Y-down and Y-up. Self-inverse.
  pub fn invert_height(&self, v: Vec2) -> Vec2 {
    Vec2::new(v.x, self.viewport_height - v.y)
  }

  /// Scales a pixel vector to meters without flipping.
  pub fn pixels_to_meters(&self, v: Vec2) -> Vec2 {
    v / self.pixels_per_meter
  }

  /// Scales a meter vector to pixels without flipping.
  pub fn meters_to_pixels(&self, v: Vec2) -> Vec2 {
    v * self.pixels_per_meter
  }

  /// World pixels (Y-down) to physics meters (Y-up).
  pub fn to_physics(&self, world: Vec2) -> Vec2 {
    self.pixels_to_meters(self.invert_height(world))
  }

  /// Physics meters (Y-up) back to world pixels (Y-down).
  pub fn to_screen(&self, physics: Vec2) -> Vec2 {
    self.invert_height(self.meters_to_pixels(physics))
  }

  /// Physics meters to Bevy world units (pixels, Y-up).
  ///
  /// Rapier is registered with the same pixels-per-meter factor, so this is
  /// the space colliders and sprites are spawned in.
  pub fn to_bevy(&self, physics: Vec2) -> Vec2 {
    self.meters_to_pixels(physics)
  }
}

/// Grid coordinate of the cell containing a world position.
///
/// Uses floor division so positions left of or above the origin map to
/// negative cells instead of collapsing onto cell zero.
pub fn world_to_grid(world: Vec2, tile_size: f32) -> IVec2 {
  (world / tile_size).floor().as_ivec2()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn physics_round_trip() {
    let space = PhysicsSpace::default();
    let world = Vec2::new(80.0, 120.0);
    let back = space.to_screen(space.to_physics(world));
    assert!((back - world).length() < 1e-3);
  }

  #[test]
  fn physics_is_y_up() {
    let space = PhysicsSpace::new(10.0, 100.0);
    assert_eq!(space.to_physics(Vec2::new(0.0, 0.0)), Vec2::new(0.0, 10.0));
    assert_eq!(space.to_physics(Vec2::new(20.0, 100.0)), Vec2::new(2.0, 0.0));
  }

  #[test]
  fn negative_world_positions_floor() {
    assert_eq!(world_to_grid(Vec2::new(-1.0, 39.9), 40.0), IVec2::new(-1, 0));
  }
}
