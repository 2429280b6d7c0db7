//! Centralised simulation and interaction constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! `SimConfig` (see `config.rs`) mirrors every value here and lets
//! `assets/sim.toml` override any subset at startup without recompiling.

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward acceleration added to `vel.y` once per tick (world units/s, y-down).
///
/// Applied per *tick*, not per second, which is the behaviour the whole demo
/// is tuned around: heavier frames fall slightly slower, acceptable for a
/// visual toy. Tested range: 5.0–50.0.
pub const GRAVITY: f32 = 20.0;

/// Ceiling on downward velocity (world units/s).
///
/// Without a terminal velocity, particles that fall for a few seconds punch
/// straight through thin obstacles between frames. 500 keeps the fastest
/// particle under ~8.5 units/frame at 60 Hz, inside the 6-unit contact
/// plane depth of a 20×20 obstacle.
pub const MAX_FALL_SPEED: f32 = 500.0;

/// Upward impulse applied when a particle lands on a top contact plane
/// (world units/s, before elasticity scaling).
///
/// The bounce deliberately ignores incoming speed: every landing restarts
/// from the same impulse, which reads as a lively fountain rather than a
/// decaying physical bounce.
pub const TOP_BOUNCE_IMPULSE: f32 = 200.0;

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// Fraction of each obstacle dimension trimmed from both ends of a contact
/// plane's long side.
///
/// The margin keeps adjacent planes from overlapping at the corners, so the
/// priority-ordered plane test stays unambiguous for shallow approach angles.
pub const CONTACT_PLANE_MARGIN: f32 = 0.1;

/// Fraction of each obstacle dimension used as contact-plane depth.
///
/// Deeper planes catch faster particles; 0.3 of a 20-unit obstacle gives a
/// 6-unit-deep plane, matching `MAX_FALL_SPEED` (see above).
pub const CONTACT_PLANE_THICKNESS: f32 = 0.3;

/// Capacity of the world's obstacle ring buffer. Placing more obstacles than
/// this silently overwrites the oldest ring slot.
pub const MAX_OBSTACLES: usize = 400;

/// Side length of a pointer-placed obstacle (world units).
pub const PLACED_OBSTACLE_SIZE: f32 = 20.0;

/// Minimum simulated seconds between two pointer-placed obstacles.
///
/// Holding the right button paints a trail of obstacles; without the limit a
/// few frames of holding would burn through ring slots faster than they can
/// be seen.
pub const OBSTACLE_PLACE_INTERVAL: f32 = 0.1;

// ── Emitters ──────────────────────────────────────────────────────────────────

/// Particle ring capacity of the drifting emitter.
pub const DRIFT_EMITTER_CAPACITY: usize = 4000;

/// Particle ring capacity of the cursor burst emitter.
pub const CURSOR_EMITTER_CAPACITY: usize = 2000;

/// Particle ring capacity of the draggable polar emitter.
pub const POLAR_EMITTER_CAPACITY: usize = 2000;

/// Particles emitted per frame by the auto-emitting emitters, and per frame
/// of left-button hold by the cursor emitter.
pub const BURST_QUANTITY: u32 = 5;

/// Horizontal inset from the window edges at which the drifting emitter
/// reverses direction (world units).
pub const DRIFT_TURN_MARGIN: f32 = 40.0;

/// Degrees of launch-angle change per unit of wheel scroll while the pointer
/// is over an emitter.
pub const SCROLL_ANGLE_STEP: f32 = 2.0;

/// Pointer interaction radius of a draggable emitter (world units).
pub const EMITTER_GRAB_RADIUS: f32 = 14.0;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Zoom multiplier change per discrete zoom step.
pub const ZOOM_STEP: f32 = 0.25;

/// Smallest allowed zoom. The floor prevents a zero or negative zoom, which
/// would make the screen→world transform non-invertible.
pub const MIN_ZOOM: f32 = 0.25;

/// Largest allowed zoom.
pub const MAX_ZOOM: f32 = 4.0;

/// Camera pan speed while an arrow key is held (world units/s).
pub const PAN_SPEED: f32 = 300.0;

// ── Window ────────────────────────────────────────────────────────────────────

/// Window width in pixels; also the world-space width at zoom 1.
pub const WINDOW_WIDTH: f32 = 1200.0;

/// Window height in pixels; also the world-space height at zoom 1.
pub const WINDOW_HEIGHT: f32 = 680.0;

// ── Persistence ───────────────────────────────────────────────────────────────

/// Default path of the obstacle save file.
pub const OBSTACLE_SAVE_PATH: &str = "obstacles.txt";

/// Largest obstacle-ring capacity a save file may declare.
///
/// The capacity line sizes an up-front allocation, so it has to be bounded:
/// a corrupt or hostile file could otherwise request an arbitrarily large
/// ring and abort the process inside the allocator. 100k is two orders of
/// magnitude above any capacity the sandbox writes.
pub const MAX_LOADED_CAPACITY: i64 = 100_000;
