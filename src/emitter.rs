//! Particle emitters: ring-buffered particle pools plus the policies that
//! fill and move them.
//!
//! One `ParticleEmitter` type covers every emitter in the demo. Motion is a
//! tagged [`MotionMode`] rather than a per-variant type, emission policies
//! are explicit methods the owning world calls (emitters never self-trigger),
//! and the hue used for new particles oscillates between two bounds instead
//! of wrapping, so the colour ramp plays forwards and backwards.

use bevy::prelude::*;
use rand::Rng;

use crate::constants::SCROLL_ANGLE_STEP;
use crate::particle::Particle;
use crate::ring::RingBuffer;

// ── Sampling helpers ──────────────────────────────────────────────────────────

/// An inclusive `[min, max]` interval sampled uniformly.
#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate interval that always samples to `value`.
    pub fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Uniform sample with an optional coin-flip sign inversion.
fn sample_signed(span: Span, random_sign: bool, rng: &mut impl Rng) -> f32 {
    let value = span.sample(rng);
    if random_sign && rng.gen_bool(0.5) {
        -value
    } else {
        value
    }
}

// ── Emission policies ─────────────────────────────────────────────────────────

/// Velocity drawn per axis from independent uniform intervals.
#[derive(Debug, Clone, Copy)]
pub struct CartesianEmission {
    pub vel_x: Span,
    pub vel_y: Span,
    pub random_sign_x: bool,
    pub random_sign_y: bool,
}

/// Velocity built from a uniform speed and a launch-angle offset added to the
/// emitter's current launch angle (degrees).
#[derive(Debug, Clone, Copy)]
pub struct PolarEmission {
    pub speed: Span,
    pub angle_offset: Span,
    pub random_sign: bool,
}

/// Appearance and response parameters shared by every emission policy.
///
/// The emitted hue is `lerp(start_hue, end_hue, hue_angle / 360)` at full
/// saturation and value, so the emitter's hue oscillation sweeps the
/// configured colour interval back and forth.
#[derive(Debug, Clone, Copy)]
pub struct ParticleStyle {
    pub radius: Span,
    pub start_hue: f32,
    pub end_hue: f32,
    pub friction: f32,
    pub elasticity: f32,
}

impl ParticleStyle {
    /// Style with no damping and full elasticity.
    pub fn new(radius: Span, start_hue: f32, end_hue: f32) -> Self {
        Self {
            radius,
            start_hue,
            end_hue,
            friction: 1.0,
            elasticity: 1.0,
        }
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// How an emitter moves each frame. Tagged behaviour, not subtypes: the world
/// iterates a homogeneous emitter list and dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    /// Position never changes on its own.
    Static,
    /// `pos.x` advances linearly and reflects off the drift bounds;
    /// `pos.y` oscillates via `vel.y * sin(pos_angle)`.
    SinusoidalDrift,
    /// Position follows the pointer while a drag gesture is active.
    Draggable,
}

/// Per-frame environment handed to [`ParticleEmitter::advance`].
#[derive(Debug, Clone, Copy)]
pub struct AdvanceEnv {
    /// Per-tick gravity added to each particle's `vel.y`.
    pub gravity: f32,
    /// Downward velocity cap for particles.
    pub max_fall_speed: f32,
    /// Inclusive x interval a drifting emitter reflects inside.
    pub drift_min_x: f32,
    pub drift_max_x: f32,
}

// ── Pointer input ─────────────────────────────────────────────────────────────

/// One frame of pointer state, already converted to world space.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub world_pos: Vec2,
    /// Primary button held this frame.
    pub pressed: bool,
    /// Primary button went down this frame.
    pub just_pressed: bool,
    /// Wheel scroll since last frame (lines).
    pub scroll: f32,
}

// ── Emitter ───────────────────────────────────────────────────────────────────

/// A particle source owning a fixed-capacity ring of particles.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    /// World position (y-down).
    pub pos: Vec2,
    /// Motion velocity; meaning depends on [`MotionMode`].
    pub vel: Vec2,
    /// Base angle for polar emission (degrees).
    pub launch_angle: f32,
    /// Position-oscillation phase (degrees), wraps at 360.
    pub pos_angle: f32,
    /// Position-oscillation rate (degrees/s).
    pub pos_angle_vel: f32,
    /// Hue-oscillation phase, bounces inside [0, 360].
    pub hue_angle: f32,
    /// Hue-oscillation rate (degrees/s); negated at either hue bound.
    pub hue_angle_vel: f32,
    /// Motion behaviour tag.
    pub motion: MotionMode,
    /// Pointer interaction radius (world units).
    pub grab_radius: f32,
    /// Pointer is currently within `grab_radius`.
    pub mouse_over: bool,
    /// A drag gesture is active.
    pub dragging: bool,
    grab_offset: Vec2,
    particles: RingBuffer<Particle>,
}

impl ParticleEmitter {
    /// Creates an emitter with an empty particle ring.
    ///
    /// `capacity` must be positive (ring-buffer precondition).
    pub fn new(
        pos: Vec2,
        vel: Vec2,
        motion: MotionMode,
        pos_angle_vel: f32,
        hue_angle_vel: f32,
        grab_radius: f32,
        capacity: usize,
    ) -> Self {
        Self {
            pos,
            vel,
            launch_angle: 0.0,
            pos_angle: 0.0,
            pos_angle_vel,
            hue_angle: 0.0,
            hue_angle_vel,
            motion,
            grab_radius,
            mouse_over: false,
            dragging: false,
            grab_offset: Vec2::ZERO,
            particles: RingBuffer::new(capacity),
        }
    }

    /// Live particles, in ring-slot order.
    pub fn particles(&self) -> &RingBuffer<Particle> {
        &self.particles
    }

    /// Mutable access for the collision resolver.
    pub fn particles_mut(&mut self) -> &mut RingBuffer<Particle> {
        &mut self.particles
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advances the emitter's own motion, its hue oscillation, and every live
    /// particle by one tick.
    pub fn advance(&mut self, delta: f32, env: &AdvanceEnv) {
        match self.motion {
            MotionMode::Static | MotionMode::Draggable => {}
            MotionMode::SinusoidalDrift => {
                self.pos.x += self.vel.x * delta;
                self.pos.y += self.vel.y * self.pos_angle.to_radians().sin() * delta;

                self.pos_angle += self.pos_angle_vel * delta;
                if self.pos_angle > 360.0 {
                    self.pos_angle = 0.0;
                }

                if self.pos.x < env.drift_min_x || self.pos.x >= env.drift_max_x {
                    self.vel.x = -self.vel.x;
                }
            }
        }

        self.advance_hue(delta);

        for particle in self.particles.iter_mut() {
            particle.advance(delta, env.gravity, env.max_fall_speed);
        }
    }

    /// Hue bounce: accumulate, clamp to [0, 360], negate the rate at either
    /// bound so the hue sweeps back instead of wrapping.
    fn advance_hue(&mut self, delta: f32) {
        self.hue_angle += self.hue_angle_vel * delta;
        if self.hue_angle < 0.0 {
            self.hue_angle = 0.0;
            self.hue_angle_vel = -self.hue_angle_vel;
        } else if self.hue_angle > 360.0 {
            self.hue_angle = 360.0;
            self.hue_angle_vel = -self.hue_angle_vel;
        }
    }

    // ── Emission ──────────────────────────────────────────────────────────────

    /// Writes one particle into the ring at the cursor slot, overwriting the
    /// oldest slot once the ring is full.
    pub fn emit(&mut self, pos: Vec2, vel: Vec2, radius: f32, color: Color, style: &ParticleStyle) {
        self.particles.push(Particle::with_coefficients(
            pos,
            vel,
            radius,
            color,
            style.friction,
            style.elasticity,
        ));
    }

    /// Emits `quantity` particles at `origin` with per-axis uniform velocity.
    pub fn emit_cartesian(
        &mut self,
        rng: &mut impl Rng,
        origin: Vec2,
        emission: &CartesianEmission,
        style: &ParticleStyle,
        quantity: u32,
    ) {
        for _ in 0..quantity {
            let vel = Vec2::new(
                sample_signed(emission.vel_x, emission.random_sign_x, rng),
                sample_signed(emission.vel_y, emission.random_sign_y, rng),
            );
            let radius = style.radius.sample(rng);
            let color = self.current_color(style);
            self.emit(origin, vel, radius, color, style);
        }
    }

    /// Emits `quantity` particles at `origin` with polar velocity: a uniform
    /// speed along `launch_angle` plus a uniform angular offset.
    ///
    /// Angle convention: 0° fires straight down (+y, since world space is
    /// y-down), `vel = (speed·sin θ, speed·cos θ)`.
    pub fn emit_polar(
        &mut self,
        rng: &mut impl Rng,
        origin: Vec2,
        emission: &PolarEmission,
        style: &ParticleStyle,
        quantity: u32,
    ) {
        for _ in 0..quantity {
            let speed = emission.speed.sample(rng);
            let offset = sample_signed(emission.angle_offset, emission.random_sign, rng);
            let theta = (self.launch_angle + offset).to_radians();
            let vel = Vec2::new(speed * theta.sin(), speed * theta.cos());
            let radius = style.radius.sample(rng);
            let color = self.current_color(style);
            self.emit(origin, vel, radius, color, style);
        }
    }

    /// Colour for a particle emitted right now: the style's hue interval
    /// sampled at the current hue-oscillation phase.
    pub fn current_color(&self, style: &ParticleStyle) -> Color {
        let t = self.hue_angle / 360.0;
        let hue = style.start_hue + (style.end_hue - style.start_hue) * t;
        Color::hsv(hue, 1.0, 1.0)
    }

    // ── Pointer interaction ───────────────────────────────────────────────────

    /// Processes one frame of pointer state and returns whether a drag is
    /// active (callers suppress other pointer-driven emission while true).
    ///
    /// The grab offset is captured at drag start so the point under the
    /// cursor stays under the cursor for the whole gesture.
    pub fn handle_pointer(&mut self, pointer: &PointerSample) -> bool {
        self.mouse_over = pointer.world_pos.distance(self.pos) <= self.grab_radius;

        if self.dragging {
            if pointer.pressed {
                self.pos = pointer.world_pos + self.grab_offset;
            } else {
                self.dragging = false;
            }
        } else if self.motion == MotionMode::Draggable && pointer.just_pressed && self.mouse_over {
            self.dragging = true;
            self.grab_offset = self.pos - pointer.world_pos;
        }

        if self.mouse_over && pointer.scroll != 0.0 {
            self.launch_angle += pointer.scroll * SCROLL_ANGLE_STEP;
        }

        self.dragging
    }
}
