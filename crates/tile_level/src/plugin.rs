//! Bevy plugin that loads tile levels and builds their collision.

use std::path::PathBuf;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::config::LevelConfig;
use crate::level::LevelState;
#[cfg(feature = "rapier2d")]
use crate::physics::{Platform, spawn_platform};
use crate::render::spawn_tile_sprites;

/// Request to replace the running level with the one at `path`.
#[derive(Message, Clone, Debug)]
pub struct LoadLevel {
  pub path: PathBuf,
}

/// Sent after a level has been validated and swapped in.
#[derive(Message, Clone, Debug)]
pub struct LevelLoaded {
  pub path: PathBuf,
  /// Number of collision regions spawned.
  pub regions: usize,
}

/// Marker for every entity owned by the current level.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct LevelEntity;

/// Loads tile levels, spawns their sprites and static collision bodies.
///
/// Inserts `config` as a resource. If `config.level_path` is set, that level
/// is requested at startup.
#[derive(Default)]
pub struct TileLevelPlugin {
  pub config: LevelConfig,
}

impl TileLevelPlugin {
  pub fn new(config: LevelConfig) -> Self {
    Self { config }
  }
}

impl Plugin for TileLevelPlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(self.config.clone())
      .add_message::<LoadLevel>()
      .add_message::<LevelLoaded>()
      .add_systems(Startup, request_startup_level)
      .add_systems(Update, apply_level_requests);
  }
}

fn request_startup_level(config: Res<LevelConfig>, mut requests: MessageWriter<LoadLevel>) {
  if let Some(path) = &config.level_path {
    requests.write(LoadLevel { path: path.clone() });
  }
}

/// Loads the most recent request and swaps it in.
///
/// The new level is parsed and every contour synthesized before anything of
/// the old level is despawned; on error the old level stays as it was.
pub fn apply_level_requests(
  mut commands: Commands,
  mut requests: MessageReader<LoadLevel>,
  mut loaded: MessageWriter<LevelLoaded>,
  config: Res<LevelConfig>,
  existing: Query<Entity, With<LevelEntity>>,
) {
  let Some(request) = requests.read().last().cloned() else {
    return;
  };

  let state = match LevelState::load(&request.path, &config) {
    Ok(state) => state,
    Err(e) => {
      error!("Failed to load level {}: {e}", request.path.display());
      return;
    }
  };

  for entity in existing.iter() {
    commands.entity(entity).despawn();
  }

  let sprites = spawn_tile_sprites(
    &mut commands,
    state.grid(),
    state.colors(),
    state.space(),
  );
  for entity in sprites {
    commands.entity(entity).insert(LevelEntity);
  }

  #[cfg(feature = "rapier2d")]
  for shape in state.shapes() {
    let platform = Platform {
      tile_type: shape.region.tile_type(),
      region: shape.index,
    };
    let entity = spawn_platform(
      &mut commands,
      platform,
      &shape.contour,
      state.space(),
      config.material,
    );
    commands.entity(entity).insert(LevelEntity);
  }

  let regions = state.shapes().len();
  info!(
    "Loaded level {} ({}x{}, {regions} collision regions)",
    request.path.display(),
    state.grid().width(),
    state.grid().height()
  );

  commands.insert_resource(state);
  loaded.write(LevelLoaded {
    path: request.path,
    regions,
  });
}
