//! Runtime simulation configuration loaded from `assets/sim.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors the tuneable constants
//! in [`crate::constants`]. At startup, [`load_sim_config`] reads
//! `assets/sim.toml` and overwrites the defaults with any values present in
//! the file. Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! Keep `src/constants.rs` in sync: it remains the authoritative default
//! source used by `SimConfig::default()`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::constants::*;

/// Runtime-tunable simulation and interaction configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Physics ───────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub top_bounce_impulse: f32,

    // ── Obstacles ─────────────────────────────────────────────────────────────
    pub max_obstacles: usize,
    pub placed_obstacle_size: f32,
    pub obstacle_place_interval: f32,

    // ── Emitters ──────────────────────────────────────────────────────────────
    pub drift_emitter_capacity: usize,
    pub cursor_emitter_capacity: usize,
    pub polar_emitter_capacity: usize,
    pub burst_quantity: u32,
    pub drift_turn_margin: f32,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub pan_speed: f32,

    // ── Persistence ───────────────────────────────────────────────────────────
    pub obstacle_save_path: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Physics
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            top_bounce_impulse: TOP_BOUNCE_IMPULSE,
            // Obstacles
            max_obstacles: MAX_OBSTACLES,
            placed_obstacle_size: PLACED_OBSTACLE_SIZE,
            obstacle_place_interval: OBSTACLE_PLACE_INTERVAL,
            // Emitters
            drift_emitter_capacity: DRIFT_EMITTER_CAPACITY,
            cursor_emitter_capacity: CURSOR_EMITTER_CAPACITY,
            polar_emitter_capacity: POLAR_EMITTER_CAPACITY,
            burst_quantity: BURST_QUANTITY,
            drift_turn_margin: DRIFT_TURN_MARGIN,
            // Camera
            zoom_step: ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            pan_speed: PAN_SPEED,
            // Persistence
            obstacle_save_path: OBSTACLE_SAVE_PATH.to_string(),
        }
    }
}

/// Startup system: attempt to load `assets/sim.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. TOML parse errors are printed
/// to stderr but do not abort the simulation. A missing file is silently
/// ignored (defaults are already in place from `insert_resource`).
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    let path = "assets/sim.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("[SETUP] Loaded sim config from {path}");
            }
            Err(e) => {
                eprintln!("[SETUP] Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present; defaults are already in place.
            println!("[SETUP] No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = SimConfig::default();
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.max_obstacles, MAX_OBSTACLES);
        assert_eq!(config.obstacle_save_path, OBSTACLE_SAVE_PATH);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: SimConfig = toml::from_str("gravity = 9.8\nburst_quantity = 12\n").unwrap();
        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.burst_quantity, 12);
        assert_eq!(config.max_fall_speed, MAX_FALL_SPEED, "unnamed keys keep defaults");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: SimConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_obstacles, SimConfig::default().max_obstacles);
    }
}
