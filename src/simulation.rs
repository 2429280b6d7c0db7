//! Simulation plugin: input handling, per-frame world update, and the strict
//! update-before-draw ordering.
//!
//! Frame shape (one `Update` pass, chained):
//! input → emit requests → advance emitters → resolve collisions → draw.
//! Draw systems live in `rendering.rs` and only ever take `&ParticleWorld`,
//! so they cannot observe a half-written frame.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use crate::config::{load_sim_config, SimConfig};
use crate::constants::EMITTER_GRAB_RADIUS;
use crate::emitter::{
    CartesianEmission, MotionMode, ParticleEmitter, ParticleStyle, PointerSample, PolarEmission,
    Span,
};
use crate::rendering;
use crate::save;
use crate::viewport::Viewport;
use crate::world::ParticleWorld;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Per-session interaction state.
///
/// These were process-wide globals in older revisions of the demo; they live
/// in an explicit resource so systems and tests can reach them without
/// static state.
#[derive(Resource, Debug, Default)]
pub struct SessionState {
    /// Info overlay visible (F1).
    pub show_info: bool,
    /// Simulated seconds since the last pointer-placed obstacle.
    pub obstacle_cooldown: f32,
    /// An emitter drag gesture is active this frame; suppresses the cursor
    /// burst so dragging an emitter does not also spray particles.
    pub drag_active: bool,
}

/// Maps the demo's three emitter roles to their indices in the world's
/// emitter list, together with each role's emission policy and style.
#[derive(Resource, Debug)]
pub struct EmitterRig {
    pub drift: usize,
    pub cursor: usize,
    pub polar: usize,
    pub drift_emission: CartesianEmission,
    pub drift_style: ParticleStyle,
    pub cursor_emission: CartesianEmission,
    pub cursor_style: ParticleStyle,
    pub polar_emission: PolarEmission,
    pub polar_style: ParticleStyle,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .init_resource::<SessionState>()
            .add_systems(Startup, setup_world.after(load_sim_config))
            .add_systems(
                Update,
                (
                    keyboard_system,
                    pointer_input_system,
                    world_update_system,
                    rendering::draw_world_system,
                    rendering::info_display_system,
                )
                    .chain(),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Builds the world: a drifting fountain sweeping the top of the window, a
/// cursor burst emitter, and a draggable polar spout.
pub fn setup_world(mut commands: Commands, config: Res<SimConfig>) {
    let mut world = ParticleWorld::new(config.max_obstacles);
    world.gravity = config.gravity;
    world.max_fall_speed = config.max_fall_speed;
    world.top_bounce_impulse = config.top_bounce_impulse;
    world.drift_min_x = config.drift_turn_margin;
    world.drift_max_x = crate::constants::WINDOW_WIDTH - config.drift_turn_margin;

    // Sweeps across the top of the window, raining particles.
    let drift = world.add_emitter(ParticleEmitter::new(
        Vec2::new(40.0, 40.0),
        Vec2::new(150.0, 100.0),
        MotionMode::SinusoidalDrift,
        200.0,
        50.0,
        EMITTER_GRAB_RADIUS,
        config.drift_emitter_capacity,
    ));

    // Follows the pointer; only emits while the left button is held.
    let cursor = world.add_emitter(ParticleEmitter::new(
        Vec2::ZERO,
        Vec2::ZERO,
        MotionMode::Static,
        0.0,
        120.0,
        EMITTER_GRAB_RADIUS,
        config.cursor_emitter_capacity,
    ));

    // Draggable spout; wheel over it steers the launch angle.
    let polar = world.add_emitter(ParticleEmitter::new(
        Vec2::new(600.0, 120.0),
        Vec2::ZERO,
        MotionMode::Draggable,
        0.0,
        80.0,
        EMITTER_GRAB_RADIUS,
        config.polar_emitter_capacity,
    ));

    commands.insert_resource(world);
    commands.insert_resource(EmitterRig {
        drift,
        cursor,
        polar,
        drift_emission: CartesianEmission {
            vel_x: Span::new(20.0, 80.0),
            vel_y: Span::new(20.0, 80.0),
            random_sign_x: true,
            random_sign_y: false,
        },
        drift_style: ParticleStyle::new(Span::new(1.0, 3.0), 180.0, 285.0),
        cursor_emission: CartesianEmission {
            vel_x: Span::new(20.0, 120.0),
            vel_y: Span::new(20.0, 120.0),
            random_sign_x: true,
            random_sign_y: true,
        },
        cursor_style: ParticleStyle::new(Span::new(1.0, 3.0), 0.0, 60.0),
        polar_emission: PolarEmission {
            speed: Span::new(150.0, 250.0),
            angle_offset: Span::new(0.0, 10.0),
            random_sign: true,
        },
        polar_style: ParticleStyle::new(Span::new(1.0, 3.0), 90.0, 150.0),
    });
    println!("[SETUP] World created: 3 emitters, obstacle capacity {}", config.max_obstacles);
}

// ── Input systems ─────────────────────────────────────────────────────────────

/// Keyboard: overlay toggle, persistence, camera pan and zoom.
pub fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<SimConfig>,
    mut session: ResMut<SessionState>,
    mut viewport: ResMut<Viewport>,
    mut world: ResMut<ParticleWorld>,
) {
    if keys.just_pressed(KeyCode::F1) {
        session.show_info = !session.show_info;
    }

    let save_path = std::path::Path::new(&config.obstacle_save_path);
    if keys.just_pressed(KeyCode::F2) {
        match save::save_obstacles(&world, save_path) {
            Ok(()) => println!("[SAVE] {} obstacles -> {}", world.obstacle_count(), save_path.display()),
            Err(e) => eprintln!("[SAVE] {e}"),
        }
    }
    if keys.just_pressed(KeyCode::F3) {
        match save::load_obstacles(save_path) {
            Ok(Some(ring)) => {
                println!("[LOAD] {} obstacles <- {}", ring.len(), save_path.display());
                world.replace_obstacles(ring);
            }
            // Missing file: leave the current state untouched.
            Ok(None) => println!("[LOAD] no save file at {}", save_path.display()),
            Err(e) => eprintln!("[LOAD] {e}"),
        }
    }
    if keys.just_pressed(KeyCode::F4) {
        world.clear_obstacles();
    }

    let pan = config.pan_speed * time.delta_secs() / viewport.zoom;
    if keys.pressed(KeyCode::ArrowLeft) {
        viewport.pan(Vec2::new(-pan, 0.0));
    }
    if keys.pressed(KeyCode::ArrowRight) {
        viewport.pan(Vec2::new(pan, 0.0));
    }
    if keys.pressed(KeyCode::ArrowUp) {
        viewport.pan(Vec2::new(0.0, -pan));
    }
    if keys.pressed(KeyCode::ArrowDown) {
        viewport.pan(Vec2::new(0.0, pan));
    }
    if keys.just_pressed(KeyCode::Equal) {
        viewport.zoom_in();
    }
    if keys.just_pressed(KeyCode::Minus) {
        viewport.zoom_out();
    }
}

/// Pointer: emitter drag, wheel (launch angle over an emitter, zoom
/// elsewhere), cursor bursts on left hold, obstacle placement on right hold.
pub fn pointer_input_system(
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: MessageReader<MouseWheel>,
    time: Res<Time>,
    config: Res<SimConfig>,
    mut viewport: ResMut<Viewport>,
    mut session: ResMut<SessionState>,
    mut world: ResMut<ParticleWorld>,
    rig: Res<EmitterRig>,
) {
    // The cooldown advances with simulated time regardless of input, capped
    // so an idle session cannot bank placements.
    session.obstacle_cooldown =
        (session.obstacle_cooldown + time.delta_secs()).min(config.obstacle_place_interval);

    let Ok(window) = windows.single() else {
        return;
    };
    viewport.window = Vec2::new(window.width(), window.height());

    let mut scroll = 0.0;
    for ev in wheel.read() {
        scroll += ev.y;
    }

    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let pointer_world = viewport.screen_to_world(cursor);

    let sample = PointerSample {
        world_pos: pointer_world,
        pressed: buttons.pressed(MouseButton::Left),
        just_pressed: buttons.just_pressed(MouseButton::Left),
        scroll,
    };

    let mut drag_active = false;
    let mut any_mouse_over = false;
    for emitter in world.emitters_mut() {
        drag_active |= emitter.handle_pointer(&sample);
        any_mouse_over |= emitter.mouse_over;
    }
    session.drag_active = drag_active;

    // Wheel away from every emitter zooms instead.
    if scroll != 0.0 && !any_mouse_over {
        if scroll > 0.0 {
            viewport.zoom_in();
        } else {
            viewport.zoom_out();
        }
    }

    let mut rng = rand::thread_rng();

    if buttons.pressed(MouseButton::Left) && !drag_active {
        let rig = &*rig;
        let emitter = world.emitter_mut(rig.cursor);
        emitter.pos = pointer_world;
        emitter.emit_cartesian(
            &mut rng,
            pointer_world,
            &rig.cursor_emission,
            &rig.cursor_style,
            config.burst_quantity,
        );
    }

    if buttons.pressed(MouseButton::Right)
        && session.obstacle_cooldown >= config.obstacle_place_interval
    {
        session.obstacle_cooldown = 0.0;
        world.add_obstacle(
            pointer_world,
            Vec2::splat(config.placed_obstacle_size),
            Color::WHITE,
        );
    }
}

// ── Update system ─────────────────────────────────────────────────────────────

/// Emits the per-frame bursts from the autonomous emitters, then advances the
/// whole world one tick (motion, hue, particles, collisions).
pub fn world_update_system(
    time: Res<Time>,
    config: Res<SimConfig>,
    rig: Res<EmitterRig>,
    mut world: ResMut<ParticleWorld>,
) {
    let mut rng = rand::thread_rng();
    let rig = &*rig;

    let drift = world.emitter_mut(rig.drift);
    let origin = drift.pos;
    drift.emit_cartesian(
        &mut rng,
        origin,
        &rig.drift_emission,
        &rig.drift_style,
        config.burst_quantity,
    );

    let polar = world.emitter_mut(rig.polar);
    let origin = polar.pos;
    polar.emit_polar(
        &mut rng,
        origin,
        &rig.polar_emission,
        &rig.polar_style,
        config.burst_quantity,
    );

    world.update(time.delta_secs());
}
