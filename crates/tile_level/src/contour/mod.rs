//! Collision contours for tile regions.
//!
//! A contour is built in three steps:
//! 1. [`BoundarySet::extract`] collects the corners of every tile that face a
//!    cell outside the region, plus the exposed tile edges, deduplicated and
//!    converted to physics space
//! 2. a [`PolygonBuilder`] orders those points into a single loop
//! 3. [`synthesize`] closes the loop by repeating its first point
//!
//! Loops wind counter-clockwise in physics space (Y-up).
//!
//! # Choosing a builder
//!
//! [`AngularSortBuilder`] sorts corners by angle around their centroid. It is
//! only guaranteed to produce a simple polygon when the region is star-shaped
//! around that centroid; concave regions can come out self-intersecting.
//! [`BoundaryTraceBuilder`] follows the exposed edges instead and is correct
//! for any region without holes.

mod angular;
mod trace;

use std::collections::HashSet;
use std::fmt;

pub use angular::AngularSortBuilder;
use bevy::math::{IVec2, Vec2};
use serde::Deserialize;
pub use trace::BoundaryTraceBuilder;

use crate::coords::PhysicsSpace;
use crate::grid::TileGrid;
use crate::region::{Neighborhood, Region};

/// Error building a contour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContourError {
  /// Too few boundary points to form a polygon.
  Degenerate { points: usize },
}

impl fmt::Display for ContourError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Degenerate { points } => {
        write!(f, "degenerate contour with {points} boundary points")
      }
    }
  }
}

impl std::error::Error for ContourError {}

/// Orders boundary points into a single open loop (first point not repeated).
pub trait PolygonBuilder {
  fn build(&self, boundary: &BoundarySet) -> Result<Vec<Vec2>, ContourError>;
}

/// Which [`PolygonBuilder`] a level uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonStrategy {
  /// Angle sort around the centroid.
  #[default]
  Angular,
  /// Edge tracing along the region boundary.
  Trace,
}

impl PolygonStrategy {
  pub fn builder(self) -> &'static dyn PolygonBuilder {
    match self {
      PolygonStrategy::Angular => &AngularSortBuilder,
      PolygonStrategy::Trace => &BoundaryTraceBuilder,
    }
  }
}

/// Boundary corners and edges of one region.
///
/// Corners live on the integer lattice of cell corners, where `(x, y)` is the
/// top-left corner of cell `(x, y)`. Lattice points are exact, so
/// deduplicating them is equivalent to deduplicating the physics-space
/// points they map to.
#[derive(Clone, Debug)]
pub struct BoundarySet {
  corners: Vec<IVec2>,
  points: Vec<Vec2>,
  edges: Vec<(IVec2, IVec2)>,
  tile_size: f32,
  space: PhysicsSpace,
}

impl BoundarySet {
  /// Collects the boundary of `region`.
  ///
  /// A neighbor is foreign when it is not a member of the region, whatever
  /// its type. A corner is emitted when any of the three cells sharing it
  /// with the tile is foreign; fully enclosed tiles emit nothing.
  pub fn extract(grid: &TileGrid, region: &Region, space: PhysicsSpace) -> Self {
    let mut seen = HashSet::new();
    let mut corners = Vec::new();
    let mut edges = Vec::new();

    for &tile in region.tiles() {
      let around = Neighborhood::sample(tile, |pos| region.contains(pos));
      let top_left = tile;
      let top_right = tile + IVec2::X;
      let bottom_right = tile + IVec2::ONE;
      let bottom_left = tile + IVec2::Y;

      let emitted = [
        (
          top_left,
          !around.top() || !around.top_left() || !around.left(),
        ),
        (
          top_right,
          !around.top() || !around.top_right() || !around.right(),
        ),
        (
          bottom_right,
          !around.right() || !around.bottom_right() || !around.bottom(),
        ),
        (
          bottom_left,
          !around.bottom() || !around.bottom_left() || !around.left(),
        ),
      ];
      for (corner, exposed) in emitted {
        if exposed && seen.insert(corner) {
          corners.push(corner);
        }
      }

      // Directed so the region lies on the left once Y is flipped up.
      if !around.top() {
        edges.push((top_right, top_left));
      }
      if !around.left() {
        edges.push((top_left, bottom_left));
      }
      if !around.bottom() {
        edges.push((bottom_left, bottom_right));
      }
      if !around.right() {
        edges.push((bottom_right, top_right));
      }
    }

    let tile_size = grid.tile_size();
    let points = corners
      .iter()
      .map(|corner| space.to_physics(corner.as_vec2() * tile_size))
      .collect();

    Self {
      corners,
      points,
      edges,
      tile_size,
      space,
    }
  }

  /// Deduplicated corners in physics space, in emission order.
  pub fn points(&self) -> &[Vec2] {
    &self.points
  }

  /// Deduplicated lattice corners, in emission order.
  pub fn corners(&self) -> &[IVec2] {
    &self.corners
  }

  /// Exposed tile edges as directed lattice segments.
  pub fn edges(&self) -> &[(IVec2, IVec2)] {
    &self.edges
  }

  /// World position (pixels, Y-down) of a lattice corner.
  pub fn to_world(&self, corner: IVec2) -> Vec2 {
    corner.as_vec2() * self.tile_size
  }

  /// Physics position of a lattice corner.
  pub fn to_physics(&self, corner: IVec2) -> Vec2 {
    self.space.to_physics(self.to_world(corner))
  }

  pub fn space(&self) -> PhysicsSpace {
    self.space
  }
}

/// Closed point loop in physics space. The last point repeats the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
  points: Vec<Vec2>,
}

impl Contour {
  /// Points including the closing duplicate.
  pub fn points(&self) -> &[Vec2] {
    &self.points
  }

  /// Distinct vertices, without the closing duplicate.
  pub fn vertices(&self) -> &[Vec2] {
    &self.points[..self.points.len() - 1]
  }

  pub fn vertex_count(&self) -> usize {
    self.points.len() - 1
  }

  /// Shoelace area; positive for counter-clockwise loops.
  pub fn signed_area(&self) -> f32 {
    signed_area(self.vertices())
  }
}

/// Shoelace area of an open loop; positive for counter-clockwise in Y-up.
pub fn signed_area(loop_points: &[Vec2]) -> f32 {
  let n = loop_points.len();
  if n < 3 {
    return 0.0;
  }
  let twice: f32 = (0..n)
    .map(|i| loop_points[i].perp_dot(loop_points[(i + 1) % n]))
    .sum();
  twice * 0.5
}

/// Builds the closed collision contour of `region`.
pub fn synthesize(
  grid: &TileGrid,
  region: &Region,
  space: PhysicsSpace,
  builder: &dyn PolygonBuilder,
) -> Result<Contour, ContourError> {
  let boundary = BoundarySet::extract(grid, region, space);
  if boundary.points().len() < 3 {
    return Err(ContourError::Degenerate {
      points: boundary.points().len(),
    });
  }

  let mut points = builder.build(&boundary)?;
  let Some(&first) = points.first() else {
    return Err(ContourError::Degenerate { points: 0 });
  };
  if points.len() < 3 {
    return Err(ContourError::Degenerate {
      points: points.len(),
    });
  }
  points.push(first);

  log::debug!(
    "{} region of {} tiles -> contour with {} vertices",
    region.tile_type(),
    region.len(),
    points.len() - 1
  );

  Ok(Contour { points })
}
