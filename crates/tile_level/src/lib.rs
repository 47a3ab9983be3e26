//! Tile Level - tile grid levels with static collision for Bevy.
//!
//! Turns a text grid of typed tiles into closed collision loops:
//! 1. [`TileGrid`] parses the level text
//! 2. [`partition`] groups same-typed tiles into regions
//! 3. [`synthesize`] builds one closed contour per region
//! 4. [`physics::spawn_platform`] hands the contour to Rapier as a fixed
//!    polyline body with friction and restitution
//!
//! [`TileLevelPlugin`] wires these together: it owns the active
//! [`LevelState`] and swaps levels only after the replacement has been fully
//! validated.
//!
//! # Example
//!
//! ```ignore
//! app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(30.0))
//!   .add_plugins(TileLevelPlugin::new(
//!     LevelConfig::default().with_level("assets/levels/level_1.txt"),
//!   ));
//! ```

pub mod config;
pub mod contour;
pub mod coords;
pub mod error;
pub mod grid;
pub mod level;
#[cfg(feature = "rapier2d")]
pub mod physics;
pub mod plugin;
pub mod region;
pub mod render;
pub mod tile;

pub use config::{ConfigError, LevelConfig, SurfaceMaterial, TileColorEntry};
pub use contour::{
  AngularSortBuilder, BoundarySet, BoundaryTraceBuilder, Contour, ContourError, PolygonBuilder,
  PolygonStrategy, synthesize,
};
pub use coords::{PIXELS_PER_METER, PhysicsSpace, VIEWPORT_HEIGHT};
pub use error::{LevelError, MalformedLevel};
pub use grid::TileGrid;
pub use level::{LevelState, RegionShape};
#[cfg(feature = "rapier2d")]
pub use physics::{Platform, platform_collider, spawn_platform};
pub use plugin::{LevelEntity, LevelLoaded, LoadLevel, TileLevelPlugin};
pub use region::{Neighborhood, Region, partition, propagate};
pub use render::{TileColors, TileSprite, spawn_tile_sprites};
pub use tile::TileType;
