//! Centroid angle sort.

use std::cmp::Ordering;

use bevy::math::Vec2;

use super::{BoundarySet, ContourError, PolygonBuilder};

/// Orders boundary points by polar angle around their centroid.
///
/// The angle is measured from +Y toward +X and sorted descending, which walks
/// the points counter-clockwise starting below the centroid. Points at the
/// same angle are ordered farther first.
///
/// Only star-shaped point sets come out as simple polygons. Concave regions
/// may self-intersect; use [`super::BoundaryTraceBuilder`] for those.
#[derive(Clone, Copy, Debug, Default)]
pub struct AngularSortBuilder;

impl PolygonBuilder for AngularSortBuilder {
  fn build(&self, boundary: &BoundarySet) -> Result<Vec<Vec2>, ContourError> {
    let points = boundary.points();
    if points.is_empty() {
      return Err(ContourError::Degenerate { points: 0 });
    }

    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;

    let mut keyed: Vec<(f32, f32, Vec2)> = points
      .iter()
      .map(|&point| {
        let d = point - centroid;
        (d.x.atan2(d.y), d.length(), point)
      })
      .collect();

    keyed.sort_by(|a, b| match b.0.total_cmp(&a.0) {
      Ordering::Equal => b.1.total_cmp(&a.1),
      order => order,
    });

    Ok(keyed.into_iter().map(|(_, _, point)| point).collect())
  }
}
