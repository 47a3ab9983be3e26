//! Dynamic balls dropped from the start tile, plus level hot keys.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use tile_level::plugin::apply_level_requests;
use tile_level::{LevelEntity, LevelLoaded, LevelState, LoadLevel};

use crate::config::GameConfig;

#[derive(Component)]
pub struct Ball;

pub struct BallPlugin;

impl Plugin for BallPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (
        drop_ball_on_load.after(apply_level_requests),
        drop_ball_on_key,
        reload_on_key,
      ),
    );
  }
}

/// Centre of the start tile in Bevy world space.
fn start_point(level: &LevelState) -> Option<Vec2> {
  let start = level.start_position()?;
  let half = Vec2::splat(level.grid().tile_size() * 0.5);
  Some(level.space().invert_height(start + half))
}

fn spawn_ball(commands: &mut Commands, config: &GameConfig, at: Vec2) {
  let ball = config.ball;
  commands.spawn((
    Ball,
    LevelEntity,
    Name::new("Ball"),
    RigidBody::Dynamic,
    Collider::ball(ball.radius),
    Restitution::coefficient(ball.restitution),
    Friction::coefficient(ball.friction),
    Sprite {
      color: Color::srgb(0.3, 0.7, 1.0),
      custom_size: Some(Vec2::splat(ball.radius * 2.0)),
      ..default()
    },
    Transform::from_xyz(at.x, at.y, 1.0),
  ));
}

fn drop_ball_on_load(
  mut commands: Commands,
  mut loaded: MessageReader<LevelLoaded>,
  level: Option<Res<LevelState>>,
  config: Res<GameConfig>,
) {
  if loaded.read().last().is_none() {
    return;
  }
  let Some(level) = level else {
    return;
  };
  match start_point(&level) {
    Some(at) => spawn_ball(&mut commands, &config, at),
    None => warn!("Level has no start tile; no ball dropped"),
  }
}

fn drop_ball_on_key(
  mut commands: Commands,
  keys: Res<ButtonInput<KeyCode>>,
  level: Option<Res<LevelState>>,
  config: Res<GameConfig>,
) {
  if !keys.just_pressed(KeyCode::Space) {
    return;
  }
  if let Some(at) = level.as_deref().and_then(start_point) {
    spawn_ball(&mut commands, &config, at);
  }
}

fn reload_on_key(
  keys: Res<ButtonInput<KeyCode>>,
  level: Option<Res<LevelState>>,
  mut requests: MessageWriter<LoadLevel>,
) {
  if !keys.just_pressed(KeyCode::KeyR) {
    return;
  }
  if let Some(path) = level.as_deref().and_then(LevelState::source) {
    info!("Reloading level {}", path.display());
    requests.write(LoadLevel {
      path: path.to_path_buf(),
    });
  }
}
