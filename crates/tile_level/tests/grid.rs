//! Integration tests for level parsing and grid queries.

use bevy::math::{IVec2, Vec2};
use tempfile::TempDir;
use tile_level::{LevelError, MalformedLevel, TileGrid, TileType};

const LEVEL: &str = "\
wwwwww
w s  w
w  +nw
w  e w
wwwwww
";

#[test]
fn parses_dimensions_and_tiles() {
  let grid = TileGrid::parse(LEVEL, 40.0).unwrap();
  assert_eq!(grid.width(), 6);
  assert_eq!(grid.height(), 5);
  assert_eq!(grid.tile_at(IVec2::new(0, 0)), TileType::Wall);
  assert_eq!(grid.tile_at(IVec2::new(2, 1)), TileType::Start);
  assert_eq!(grid.tile_at(IVec2::new(3, 2)), TileType::Waypoint);
  assert_eq!(grid.tile_at(IVec2::new(4, 2)), TileType::Enemy);
  assert_eq!(grid.tile_at(IVec2::new(3, 3)), TileType::End);
  assert_eq!(grid.tile_at(IVec2::new(1, 1)), TileType::Empty);
}

#[test]
fn out_of_bounds_is_empty() {
  let grid = TileGrid::parse(LEVEL, 40.0).unwrap();
  let (w, h) = (grid.width() as i32, grid.height() as i32);

  for x in -2..w + 2 {
    for y in [-2, -1, h, h + 1] {
      assert_eq!(grid.tile_at(IVec2::new(x, y)), TileType::Empty, "({x}, {y})");
    }
  }
  for y in -2..h + 2 {
    for x in [-2, -1, w, w + 1] {
      assert_eq!(grid.tile_at(IVec2::new(x, y)), TileType::Empty, "({x}, {y})");
    }
  }
}

#[test]
fn short_last_row_is_malformed() {
  let err = TileGrid::parse("wwww\nw  w\nww\n", 40.0).unwrap_err();
  assert!(
    matches!(
      err,
      LevelError::Malformed(MalformedLevel::RaggedRow {
        row: 2,
        expected: 4,
        found: 2
      })
    ),
    "unexpected error: {err}"
  );
}

#[test]
fn long_middle_row_is_malformed() {
  // Row lengths 3 + 1 + 5 add up to 3 * 3, which a total count alone accepts.
  let err = TileGrid::parse("www\nw\nwwwww\n", 40.0).unwrap_err();
  assert!(
    matches!(
      err,
      LevelError::Malformed(MalformedLevel::RaggedRow {
        row: 1,
        expected: 3,
        found: 1
      })
    ),
    "unexpected error: {err}"
  );
}

#[test]
fn empty_text_is_malformed() {
  let err = TileGrid::parse("", 40.0).unwrap_err();
  assert!(matches!(err, LevelError::Malformed(MalformedLevel::Empty)));
}

#[test]
fn unknown_character_is_fatal() {
  let err = TileGrid::parse("www\nwxw\n", 40.0).unwrap_err();
  assert!(matches!(
    err,
    LevelError::UnrecognizedTile {
      character: 'x',
      row: 1,
      column: 1
    }
  ));
}

#[test]
fn start_position_is_tile_top_left() {
  let grid = TileGrid::parse(LEVEL, 40.0).unwrap();
  assert_eq!(grid.start_cell(), Some(IVec2::new(2, 1)));
  assert_eq!(grid.start_position(), Some(Vec2::new(80.0, 40.0)));
}

#[test]
fn level_without_start() {
  let grid = TileGrid::parse("www\n", 40.0).unwrap();
  assert_eq!(grid.start_position(), None);
}

#[test]
fn world_position_round_trip() {
  let grid = TileGrid::parse(LEVEL, 32.0).unwrap();
  for (pos, tile) in grid.iter() {
    let world = grid.tile_world_pos(pos);
    let back = world / grid.tile_size();
    assert!((back - pos.as_vec2()).length() < 1e-4);
    // Anywhere inside the cell resolves to the same tile.
    assert_eq!(grid.tile_at_world(world + Vec2::splat(16.0)), tile);
  }
}

#[test]
fn offset_keeps_tile_positions_in_grid_space() {
  let grid = TileGrid::parse(LEVEL, 40.0)
    .unwrap()
    .with_offset(Vec2::new(-60.0, 25.0));

  for (pos, _) in grid.iter() {
    let back = grid.tile_world_pos(pos) / grid.tile_size();
    assert!((back - pos.as_vec2()).length() < 1e-4);
  }
  assert_eq!(grid.start_position(), Some(Vec2::new(80.0, 40.0)));
  // Lookups subtract the offset: cell (2, 1) now sits at (20..60, 65..105).
  assert_eq!(grid.tile_at_world(Vec2::new(30.0, 70.0)), TileType::Start);
}

#[test]
fn world_lookup_outside_grid() {
  let grid = TileGrid::parse(LEVEL, 40.0).unwrap();
  assert_eq!(grid.tile_at_world(Vec2::new(-1.0, 10.0)), TileType::Empty);
  assert_eq!(grid.tile_at_world(Vec2::new(10.0, 1000.0)), TileType::Empty);
}

#[test]
fn find_tiles_is_row_major() {
  let grid = TileGrid::parse("w w\n w \nw w\n", 10.0).unwrap();
  assert_eq!(
    grid.find_tiles(TileType::Wall),
    vec![
      IVec2::new(0, 0),
      IVec2::new(2, 0),
      IVec2::new(1, 1),
      IVec2::new(0, 2),
      IVec2::new(2, 2),
    ]
  );
}

#[test]
fn load_reads_file() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("level.txt");
  std::fs::write(&path, LEVEL).unwrap();

  let grid = TileGrid::load(&path, 40.0).unwrap();
  assert_eq!(grid.to_text(), LEVEL);
}

#[test]
fn missing_file_is_unreadable() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("missing.txt");

  let err = TileGrid::load(&path, 40.0).unwrap_err();
  match err {
    LevelError::Unreadable { path: reported, .. } => assert_eq!(reported, path),
    other => panic!("expected Unreadable, got {other}"),
  }
}
