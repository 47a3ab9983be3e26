//! Tile types and their level-text symbols.

use serde::Deserialize;

/// Semantic type of a single grid cell.
///
/// The same value drives collision (regions are built per type) and gameplay
/// markers such as spawn points and enemy waypoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
  #[default]
  Empty,
  Start,
  End,
  Wall,
  Enemy,
  Waypoint,
}

impl TileType {
  /// Every tile type in declaration order.
  pub const ALL: [TileType; 6] = [
    TileType::Empty,
    TileType::Start,
    TileType::End,
    TileType::Wall,
    TileType::Enemy,
    TileType::Waypoint,
  ];

  /// Maps a level-text character to its tile type.
  ///
  /// Returns `None` for characters outside the level alphabet, including
  /// line breaks, which the parser handles separately.
  pub const fn from_char(c: char) -> Option<TileType> {
    match c {
      ' ' => Some(TileType::Empty),
      's' => Some(TileType::Start),
      'e' => Some(TileType::End),
      'w' => Some(TileType::Wall),
      'n' => Some(TileType::Enemy),
      '+' => Some(TileType::Waypoint),
      _ => None,
    }
  }

  /// The level-text character for this tile type.
  pub const fn symbol(self) -> char {
    match self {
      TileType::Empty => ' ',
      TileType::Start => 's',
      TileType::End => 'e',
      TileType::Wall => 'w',
      TileType::Enemy => 'n',
      TileType::Waypoint => '+',
    }
  }

  /// Lowercase name, matching the config file spelling.
  pub const fn name(self) -> &'static str {
    match self {
      TileType::Empty => "empty",
      TileType::Start => "start",
      TileType::End => "end",
      TileType::Wall => "wall",
      TileType::Enemy => "enemy",
      TileType::Waypoint => "waypoint",
    }
  }
}

impl std::fmt::Display for TileType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}
