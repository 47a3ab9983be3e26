//! Level loading errors.
//!
//! Every variant is fatal for the load in progress. Callers validate a new
//! level completely before tearing down the current one, so a failed load
//! leaves the previous level usable.

use std::error::Error;
use std::path::PathBuf;
use std::{fmt, io};

use crate::contour::ContourError;
use crate::tile::TileType;

/// Error loading or validating a tile level.
#[derive(Debug)]
pub enum LevelError {
  /// The level file could not be opened or read.
  Unreadable { path: PathBuf, source: io::Error },
  /// The level text parsed but does not describe a usable grid.
  Malformed(MalformedLevel),
  /// A character outside the level alphabet.
  UnrecognizedTile { character: char, row: usize, column: usize },
}

/// Why a level was rejected as malformed.
#[derive(Debug)]
pub enum MalformedLevel {
  /// No rows at all.
  Empty,
  /// A row whose length differs from the first row, so the cell count is not
  /// `width * height`.
  RaggedRow { row: usize, expected: usize, found: usize },
  /// A region produced no usable collision contour.
  DegenerateRegion {
    tile_type: TileType,
    region: usize,
    source: ContourError,
  },
}

impl fmt::Display for LevelError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unreadable { path, source } => {
        write!(f, "couldn't open level file {}: {source}", path.display())
      }
      Self::Malformed(reason) => write!(f, "malformed level: {reason}"),
      Self::UnrecognizedTile {
        character,
        row,
        column,
      } => write!(
        f,
        "unrecognized tile character {character:?} at row {row}, column {column}"
      ),
    }
  }
}

impl fmt::Display for MalformedLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => write!(f, "level has no rows"),
      Self::RaggedRow {
        row,
        expected,
        found,
      } => write!(f, "row {row} has {found} cells, expected {expected}"),
      Self::DegenerateRegion {
        tile_type,
        region,
        source,
      } => write!(f, "{tile_type} region {region}: {source}"),
    }
  }
}

impl Error for LevelError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::Unreadable { source, .. } => Some(source),
      Self::Malformed(reason) => Some(reason),
      Self::UnrecognizedTile { .. } => None,
    }
  }
}

impl Error for MalformedLevel {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::DegenerateRegion { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<MalformedLevel> for LevelError {
  fn from(reason: MalformedLevel) -> Self {
    Self::Malformed(reason)
  }
}
