//! Boundary tracing along exposed tile edges.
//!
//! Every exposed edge is directed with the region on its left (in physics
//! space), so chaining edges end to start walks each boundary loop
//! counter-clockwise for the outside and clockwise for holes.

use std::collections::HashMap;

use bevy::math::{IVec2, Vec2};

use super::{BoundarySet, ContourError, PolygonBuilder, signed_area};

/// Orders boundary points by walking the region's exposed edges.
///
/// Produces a simple polygon for any hole-free region, including L and U
/// shapes. For regions with holes only the outer loop is returned; a chain
/// shape holds one loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundaryTraceBuilder;

impl PolygonBuilder for BoundaryTraceBuilder {
  fn build(&self, boundary: &BoundarySet) -> Result<Vec<Vec2>, ContourError> {
    let loops: Vec<Vec<Vec2>> = connect_edges(boundary.edges())
      .into_iter()
      .map(|lattice| {
        lattice
          .into_iter()
          .map(|corner| boundary.to_physics(corner))
          .collect()
      })
      .collect();

    let (outer, holes) = split_outer(loops);
    if holes > 0 {
      log::warn!("region has {holes} interior loops; only the outer boundary gets collision");
    }

    outer.ok_or(ContourError::Degenerate {
      points: boundary.points().len(),
    })
  }
}

/// Picks the loop with the largest signed area and counts the clockwise
/// (hole) loops among the rest.
fn split_outer(loops: Vec<Vec<Vec2>>) -> (Option<Vec<Vec2>>, usize) {
  let holes = loops.iter().filter(|l| signed_area(l) < 0.0).count();
  let outer = loops
    .into_iter()
    .max_by(|a, b| signed_area(a).total_cmp(&signed_area(b)));
  (outer, holes)
}

/// Maps each lattice point to the edges that start there.
fn build_adjacency_map(edges: &[(IVec2, IVec2)]) -> HashMap<IVec2, Vec<usize>> {
  let mut adjacency: HashMap<IVec2, Vec<usize>> = HashMap::new();
  for (i, (start, _)) in edges.iter().enumerate() {
    adjacency.entry(*start).or_default().push(i);
  }
  adjacency
}

/// Edge direction with Y flipped up.
fn physics_direction(edge: (IVec2, IVec2)) -> Vec2 {
  let d = (edge.1 - edge.0).as_vec2();
  Vec2::new(d.x, -d.y)
}

/// Ranks a turn from `incoming` onto `outgoing`: left, straight, right,
/// reverse. Taking the left-most turn wraps tightly around the current tile,
/// so two region tiles meeting only at a corner never share a loop there.
fn turn_rank(incoming: Vec2, outgoing: Vec2) -> i32 {
  let cross = incoming.perp_dot(outgoing);
  if cross > 0.0 {
    2
  } else if cross < 0.0 {
    0
  } else if incoming.dot(outgoing) > 0.0 {
    1
  } else {
    -1
  }
}

/// Walks one loop starting at `start_idx`, returning its lattice points
/// without the closing duplicate.
fn traverse_loop(
  edges: &[(IVec2, IVec2)],
  adjacency: &HashMap<IVec2, Vec<usize>>,
  used: &mut [bool],
  start_idx: usize,
) -> Vec<IVec2> {
  let origin = edges[start_idx].0;
  let mut points = vec![origin];
  let mut current = start_idx;

  loop {
    used[current] = true;
    let edge = edges[current];
    if edge.1 == origin {
      break;
    }
    points.push(edge.1);

    let incoming = physics_direction(edge);
    let next = adjacency.get(&edge.1).and_then(|candidates| {
      candidates
        .iter()
        .copied()
        .filter(|&idx| !used[idx])
        .max_by_key(|&idx| turn_rank(incoming, physics_direction(edges[idx])))
    });

    match next {
      Some(idx) => current = idx,
      None => {
        log::debug!("boundary walk from {origin} ended open at {}", edge.1);
        break;
      }
    }
  }

  points
}

/// Chains directed edges into closed loops.
fn connect_edges(edges: &[(IVec2, IVec2)]) -> Vec<Vec<IVec2>> {
  if edges.is_empty() {
    return vec![];
  }

  let adjacency = build_adjacency_map(edges);
  let mut used = vec![false; edges.len()];
  let mut loops = Vec::new();

  for start_idx in 0..edges.len() {
    if used[start_idx] {
      continue;
    }

    let points = traverse_loop(edges, &adjacency, &mut used, start_idx);
    if points.len() >= 3 {
      loops.push(points);
    }
  }

  loops
}
