//! Integration tests for region partitioning.

use std::collections::HashSet;

use bevy::math::IVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tile_level::{TileGrid, TileType, partition, propagate};

fn sizes(text: &str) -> Vec<usize> {
  let grid = TileGrid::parse(text, 10.0).unwrap();
  partition(&grid, TileType::Wall)
    .iter()
    .map(|region| region.len())
    .collect()
}

fn random_level(rng: &mut StdRng, width: usize, height: usize) -> String {
  let mut text = String::new();
  for _ in 0..height {
    for _ in 0..width {
      let c = match rng.gen_range(0..10) {
        0..=4 => 'w',
        5 => 'n',
        6 => '+',
        _ => ' ',
      };
      text.push(c);
    }
    text.push('\n');
  }
  text
}

#[test]
fn partition_covers_every_tile_once() {
  let mut rng = StdRng::seed_from_u64(7);

  for _ in 0..50 {
    let text = random_level(&mut rng, 9, 7);
    let grid = TileGrid::parse(&text, 10.0).unwrap();

    for tile_type in [TileType::Wall, TileType::Empty, TileType::Enemy] {
      let expected: HashSet<IVec2> = grid.find_tiles(tile_type).into_iter().collect();
      let regions = partition(&grid, tile_type);

      let mut seen = HashSet::new();
      for region in &regions {
        assert!(!region.is_empty());
        assert_eq!(region.tile_type(), tile_type);
        for &pos in region.tiles() {
          assert_eq!(grid.tile_at(pos), tile_type);
          assert!(seen.insert(pos), "{pos} assigned twice in\n{text}");
        }
      }
      assert_eq!(seen, expected, "partition mismatch in\n{text}");
    }
  }
}

#[test]
fn diagonal_contact_does_not_merge() {
  assert_eq!(sizes("w \n w\n"), vec![1, 1]);
  assert_eq!(sizes(" w\nw \n"), vec![1, 1]);
}

#[test]
fn single_tile_is_singleton() {
  assert_eq!(sizes("   \n w \n   \n"), vec![1]);
}

#[test]
fn block_is_one_region() {
  assert_eq!(sizes("ww\nww\n"), vec![4]);
  assert_eq!(sizes("www\nwww\nwww\n"), vec![9]);
}

#[test]
fn column_is_one_region() {
  assert_eq!(sizes("w\nw\nw\nw\n"), vec![4]);
}

#[test]
fn row_overhang_splits_off() {
  // The top row cannot extend down past its ragged right side.
  assert_eq!(sizes("www\nw  \n"), vec![3, 1]);
}

#[test]
fn regions_seed_in_row_major_order() {
  let grid = TileGrid::parse("  w\nw  \n", 10.0).unwrap();
  let regions = partition(&grid, TileType::Wall);
  assert_eq!(regions[0].tiles(), &[IVec2::new(2, 0)]);
  assert_eq!(regions[1].tiles(), &[IVec2::new(0, 1)]);
}

#[test]
fn propagate_over_custom_predicate() {
  // Horizontal run of five, only cells 0..=4 on row 0 are members.
  let tiles = propagate(IVec2::new(2, 0), |pos| pos.y == 0 && (0..5).contains(&pos.x));
  let set: HashSet<IVec2> = tiles.iter().copied().collect();
  assert_eq!(tiles.len(), 5);
  assert_eq!(tiles[0], IVec2::new(2, 0));
  assert!((0..5).all(|x| set.contains(&IVec2::new(x, 0))));
}

#[test]
fn propagate_visits_right_before_left() {
  let tiles = propagate(IVec2::new(1, 0), |pos| pos.y == 0 && (0..3).contains(&pos.x));
  assert_eq!(
    tiles,
    vec![IVec2::new(1, 0), IVec2::new(2, 0), IVec2::new(0, 0)]
  );
}
