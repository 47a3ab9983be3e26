use bevy::{camera::ScalingMode, prelude::*};

use crate::config::GameConfig;

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Orthographic camera framing the viewport the level is laid out in.
///
/// Levels are placed in Y-up pixels with the origin at the bottom-left of the
/// viewport, so the camera sits at the viewport centre.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
  let camera = &config.camera;
  let [r, g, b, a] = camera.clear_color;

  commands.spawn((
    GameCamera,
    Camera2d,
    Camera {
      order: 0,
      clear_color: ClearColorConfig::Custom(Color::srgba(r, g, b, a)),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::AutoMin {
        min_width: camera.viewport_width,
        min_height: camera.viewport_height,
      },
      area: Rect::default(),
    }),
    Transform::from_xyz(
      camera.viewport_width * 0.5,
      config.level.physics.viewport_height * 0.5,
      0.0,
    ),
  ));
}
