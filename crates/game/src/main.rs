mod ball;
mod camera;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::{prelude::*, window::WindowResolution};
use bevy_rapier2d::prelude::*;
use clap::Parser;
use tile_level::{PolygonStrategy, TileLevelPlugin};

use crate::config::{ASSETS_DIR, GameConfig, resolve_asset_path};

/// Runs a tile level with static collision and a dynamic test ball.
#[derive(Parser, Debug)]
#[command(name = "tile_game")]
struct Args {
  /// Level file; overrides the one named in the config.
  #[arg(long)]
  level: Option<PathBuf>,
  /// Game config file.
  #[arg(long)]
  config: Option<PathBuf>,
  /// Polygon builder for region contours.
  #[arg(long, value_parser = parse_polygon)]
  polygon: Option<PolygonStrategy>,
  /// Draw collider outlines.
  #[arg(long)]
  debug_colliders: bool,
}

fn parse_polygon(s: &str) -> Result<PolygonStrategy, String> {
  match s {
    "angular" => Ok(PolygonStrategy::Angular),
    "trace" => Ok(PolygonStrategy::Trace),
    other => Err(format!("unknown polygon builder '{other}' (angular, trace)")),
  }
}

fn main() -> ExitCode {
  let args = Args::parse();

  let config_path = args
    .config
    .unwrap_or_else(|| PathBuf::from(ASSETS_DIR).join("config/game.config.toml"));
  let mut config = match GameConfig::load(&config_path) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{e}");
      return ExitCode::FAILURE;
    }
  };
  if let Some(level) = args.level {
    config.level.level_path = Some(resolve_asset_path(level));
  }
  if let Some(polygon) = args.polygon {
    config.level.polygon = polygon;
  }
  config.debug.colliders |= args.debug_colliders;

  let mut app = App::new();

  app
    .add_plugins(DefaultPlugins.set(WindowPlugin {
      primary_window: Some(Window {
        resolution: WindowResolution::new(config.window.width, config.window.height),
        title: config.window.title.clone(),
        ..default()
      }),
      ..default()
    }))
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
      config.level.physics.pixels_per_meter,
    ))
    .add_plugins(TileLevelPlugin::new(config.level.clone()))
    .add_plugins(ball::BallPlugin)
    .add_systems(Startup, camera::setup_camera);

  if config.debug.colliders {
    app.add_plugins(RapierDebugRenderPlugin::default());
  }

  app.insert_resource(config);
  app.run();

  ExitCode::SUCCESS
}
