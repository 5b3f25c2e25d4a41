//! minimal bootstrap for the tile‑world demo
//!
//! A/D walk, Space jumps, hold LMB to mine & RMB to place the selected
//! block, 1‑9 pick a hotbar slot. Works with **Bevy 0.15**.
//!
//! `TILEWORLD_SEED` / `TILEWORLD_ZOOM` override the random seed and the
//! default zoom.

mod host;

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
    LogDiagnosticsPlugin,
};
use bevy::log::{info, warn};
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy::window::WindowMode;

use tileworld::{ConfigError, GameConfig, Hotbar, Simulation, ViewTransform};

use host::camera::{camera_follow_system, setup_camera, View};
use host::input::{hotbar_input_system, step_simulation_system, toggle_fullscreen};
use host::render::{
    drop_sprites_system, mining_overlay_system, player_sprite_system,
    spawn_entity_sprites, tile_render_system, TileSprites,
};

/// configuration as read at launch; logged once the log plugin is up
#[derive(Resource)]
struct Launch {
    config: GameConfig,
    error: Option<ConfigError>,
}

/* ------------------------------------------------------------------------ */
/* world                                                                    */
/* ------------------------------------------------------------------------ */
fn setup_world(mut commands: Commands, launch: Res<Launch>) {
    if let Some(err) = &launch.error {
        warn!(%err, "bad configuration, falling back to defaults");
    }
    let GameConfig { seed, zoom } = launch.config;
    info!(seed, zoom, "starting tile world");

    commands.insert_resource(Simulation::new(seed));
    commands.insert_resource(TileSprites::new(seed));
    commands.insert_resource(View(ViewTransform { camera_x: 0.0, zoom }));
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    let launch = match GameConfig::from_env() {
        Ok(config) => Launch { config, error: None },
        Err(err) => Launch { config: GameConfig::default(), error: Some(err) },
    };

    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::srgb(0.5, 0.75, 1.0)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "tileworld".into(),
                resolution: (1280., 720.).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(launch)
        .init_resource::<Hotbar>()

        /* startup systems ------------------------------------------------- */
        .add_systems(
            Startup,
            (setup_world, setup_camera, spawn_entity_sprites).chain(),
        )

        /* frame‑update systems ------------------------------------------- */
        .add_systems(
            Update,
            (
                hotbar_input_system,     // 1‑9 hot‑keys
                step_simulation_system,  // physics, mining, placing, drops
                toggle_fullscreen,
            )
                .chain(),
        )

        /* post‑update (camera, then sprites) ------------------------------ */
        .add_systems(
            PostUpdate,
            (
                camera_follow_system,
                (
                    tile_render_system,
                    player_sprite_system,
                    drop_sprites_system,
                    mining_overlay_system,
                ),
            )
                .chain()
                .before(TransformSystem::TransformPropagate),
        )
        .run();
}
