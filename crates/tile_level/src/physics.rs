//! Rapier2d static bodies for region contours.
//!
//! Rapier is expected to run with `pixels_per_meter` equal to
//! [`PhysicsSpace::pixels_per_meter`], so collider vertices are given in Bevy
//! world units (pixels, Y-up) and Rapier scales them back to meters.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::SurfaceMaterial;
use crate::contour::Contour;
use crate::coords::PhysicsSpace;
use crate::tile::TileType;

/// Marker for the static collision body built from one region.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Platform {
  pub tile_type: TileType,
  /// Index of the region within its tile type's partition.
  pub region: usize,
}

/// Closed polyline collider tracing `contour`.
pub fn platform_collider(contour: &Contour, space: PhysicsSpace) -> Collider {
  let vertices: Vec<Vec2> = contour
    .vertices()
    .iter()
    .map(|&point| space.to_bevy(point))
    .collect();
  let n = vertices.len() as u32;
  let indices: Vec<[u32; 2]> = (0..n).map(|i| [i, (i + 1) % n]).collect();
  Collider::polyline(vertices, Some(indices))
}

/// Spawns a fixed body with a closed chain collider and surface material.
pub fn spawn_platform(
  commands: &mut Commands,
  platform: Platform,
  contour: &Contour,
  space: PhysicsSpace,
  material: SurfaceMaterial,
) -> Entity {
  commands
    .spawn((
      Name::new(format!("{} platform {}", platform.tile_type, platform.region)),
      platform,
      RigidBody::Fixed,
      platform_collider(contour, space),
      Friction::coefficient(material.friction),
      Restitution::coefficient(material.restitution),
      Transform::default(),
    ))
    .id()
}
