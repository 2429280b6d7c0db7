use bevy::prelude::*;
use bevy::window::WindowResolution;

use emberfall::config::{self, SimConfig};
use emberfall::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use emberfall::rendering;
use emberfall::simulation::SimulationPlugin;

/// Setup camera for 2D rendering.
///
/// The viewport transform (pan/zoom) is applied per draw call in
/// `rendering.rs`; the Bevy camera itself stays fixed.
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Emberfall".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert SimConfig with compiled defaults; load_sim_config overwrites
        // it from assets/sim.toml (if present) in the Startup schedule.
        .insert_resource(SimConfig::default())
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                config::load_sim_config,
                setup_camera.after(config::load_sim_config),
                rendering::setup_info_text.after(setup_camera),
            ),
        )
        .add_plugins(SimulationPlugin)
        .run();
}
