//! The simulation world: emitters, the obstacle ring, and the per-frame
//! collision resolver.
//!
//! Collision resolution is deliberately brute force — every live particle of
//! every emitter against every live obstacle, O(particles × obstacles) per
//! frame. Counts stay in the low thousands, so a broad phase would cost more
//! in complexity than it buys in time.

use bevy::prelude::*;

use crate::constants::{
    DRIFT_TURN_MARGIN, GRAVITY, MAX_FALL_SPEED, TOP_BOUNCE_IMPULSE, WINDOW_WIDTH,
};
use crate::emitter::{AdvanceEnv, ParticleEmitter};
use crate::obstacle::{ContactPlane, Obstacle};
use crate::particle::Particle;
use crate::ring::RingBuffer;

/// Owns every emitter and the obstacle ring; advanced once per frame.
///
/// Mutated exclusively by the update pass; draw systems read it immutably
/// strictly after the update pass has finished (enforced by system ordering).
#[derive(Resource, Debug)]
pub struct ParticleWorld {
    emitters: Vec<ParticleEmitter>,
    obstacles: RingBuffer<Obstacle>,
    /// Per-tick gravity for particles.
    pub gravity: f32,
    /// Downward particle velocity cap.
    pub max_fall_speed: f32,
    /// Top contact-plane bounce impulse (before elasticity scaling).
    pub top_bounce_impulse: f32,
    /// X interval inside which drifting emitters reflect.
    pub drift_min_x: f32,
    pub drift_max_x: f32,
}

impl ParticleWorld {
    /// Creates an empty world with an obstacle ring of the given capacity and
    /// physics parameters from `constants.rs`.
    pub fn new(max_obstacles: usize) -> Self {
        Self {
            emitters: Vec::new(),
            obstacles: RingBuffer::new(max_obstacles),
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            top_bounce_impulse: TOP_BOUNCE_IMPULSE,
            drift_min_x: DRIFT_TURN_MARGIN,
            drift_max_x: WINDOW_WIDTH - DRIFT_TURN_MARGIN,
        }
    }

    // ── Emitters ──────────────────────────────────────────────────────────────

    /// Adds an emitter and returns its stable index.
    pub fn add_emitter(&mut self, emitter: ParticleEmitter) -> usize {
        self.emitters.push(emitter);
        self.emitters.len() - 1
    }

    pub fn emitters(&self) -> &[ParticleEmitter] {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut [ParticleEmitter] {
        &mut self.emitters
    }

    pub fn emitter_mut(&mut self, index: usize) -> &mut ParticleEmitter {
        &mut self.emitters[index]
    }

    /// Total live particles across all emitters.
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|e| e.particles().len()).sum()
    }

    // ── Obstacles ─────────────────────────────────────────────────────────────

    /// Places an obstacle, overwriting the oldest ring slot once full.
    pub fn add_obstacle(&mut self, pos: Vec2, dim: Vec2, color: Color) {
        self.obstacles.push(Obstacle::new(pos, dim, color));
    }

    pub fn obstacles(&self) -> &RingBuffer<Obstacle> {
        &self.obstacles
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Removes every obstacle; capacity is unchanged.
    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Swaps in a freshly loaded obstacle ring (capacity comes from the save
    /// file, not from this world's previous ring).
    pub fn replace_obstacles(&mut self, obstacles: RingBuffer<Obstacle>) {
        self.obstacles = obstacles;
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// One simulation tick: advance every emitter (and its particles), then
    /// resolve particle-obstacle collisions.
    pub fn update(&mut self, delta: f32) {
        let env = AdvanceEnv {
            gravity: self.gravity,
            max_fall_speed: self.max_fall_speed,
            drift_min_x: self.drift_min_x,
            drift_max_x: self.drift_max_x,
        };
        for emitter in &mut self.emitters {
            emitter.advance(delta, &env);
        }
        self.resolve_collisions();
    }

    /// Tests every live particle against every live obstacle.
    ///
    /// Obstacles are resolved sequentially, so a later obstacle's response
    /// can override an earlier one's within the same frame — an accepted
    /// approximation for densely packed obstacles.
    pub fn resolve_collisions(&mut self) {
        let impulse = self.top_bounce_impulse;
        for emitter in &mut self.emitters {
            for particle in emitter.particles_mut().iter_mut() {
                for obstacle in self.obstacles.iter() {
                    resolve_particle_obstacle(particle, obstacle, impulse);
                }
            }
        }
    }
}

/// Resolves one particle against one obstacle.
///
/// At most one contact plane fires, chosen by the fixed priority order
/// top → bottom → left → right (see [`Obstacle::first_contact`]).
pub fn resolve_particle_obstacle(particle: &mut Particle, obstacle: &Obstacle, top_impulse: f32) {
    let Some(plane) = obstacle.first_contact(particle.pos, particle.radius) else {
        return;
    };
    let rect = obstacle.rect;
    let e = particle.elasticity;
    match plane {
        // Bounce impulse ignores incoming speed: every landing restarts the
        // fountain from the same height.
        ContactPlane::Top => {
            particle.vel.y = -top_impulse * e;
        }
        ContactPlane::Bottom => {
            particle.pos.y = rect.max.y + particle.radius;
            particle.vel.y = particle.vel.y.abs() * e;
        }
        ContactPlane::Left => {
            particle.pos.x = rect.min.x - particle.radius;
            particle.vel.x = -particle.vel.x.abs() * e;
        }
        ContactPlane::Right => {
            particle.pos.x = rect.max.x + particle.radius;
            particle.vel.x = particle.vel.x.abs() * e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{CartesianEmission, MotionMode, ParticleStyle, Span};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle_at(pos: Vec2, vel: Vec2, radius: f32) -> Particle {
        Particle::new(pos, vel, radius, Color::WHITE)
    }

    // 20×20 obstacle at (90, 90): planes top y 90..96, bottom y 104..110,
    // left x 90..96, right x 104..110 (margin 2 on the long sides).
    fn obstacle() -> Obstacle {
        Obstacle::new(Vec2::new(90.0, 90.0), Vec2::new(20.0, 20.0), Color::WHITE)
    }

    // ── Plane responses ───────────────────────────────────────────────────────

    #[test]
    fn top_plane_applies_fixed_upward_impulse() {
        // Falling onto the top face from above.
        let mut p = particle_at(Vec2::new(100.0, 88.0), Vec2::new(0.0, 120.0), 3.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.vel.y, -200.0, "impulse must ignore incoming speed");
        assert_eq!(p.pos, Vec2::new(100.0, 88.0), "top response does not reposition");
    }

    #[test]
    fn top_impulse_scales_with_elasticity() {
        let mut p = Particle::with_coefficients(
            Vec2::new(100.0, 88.0),
            Vec2::new(0.0, 120.0),
            3.0,
            Color::WHITE,
            1.0,
            0.5,
        );
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.vel.y, -100.0);
    }

    #[test]
    fn left_plane_repositions_and_reflects() {
        // Touching the left face only: centre left of the rect, side-plane
        // band, clear of the top/bottom planes.
        let mut p = particle_at(Vec2::new(87.0, 100.0), Vec2::new(-50.0, 0.0), 5.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.pos.x, 85.0, "pushed out to rect.x - radius");
        assert_eq!(p.vel.x, -50.0, "mirrored magnitude directed away from the obstacle");
    }

    #[test]
    fn right_plane_repositions_and_reflects() {
        let mut p = particle_at(Vec2::new(113.0, 100.0), Vec2::new(-50.0, 0.0), 5.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.pos.x, 115.0, "pushed out to rect.x + width + radius");
        assert_eq!(p.vel.x, 50.0);
    }

    #[test]
    fn bottom_plane_repositions_below() {
        // Rising into the underside.
        let mut p = particle_at(Vec2::new(100.0, 112.0), Vec2::new(0.0, -80.0), 3.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.pos.y, 113.0, "pushed out to rect.y + height + radius");
        assert_eq!(p.vel.y, 80.0, "vertical velocity forced downward");
    }

    #[test]
    fn no_contact_leaves_particle_untouched() {
        let mut p = particle_at(Vec2::new(0.0, 0.0), Vec2::new(7.0, 7.0), 2.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.pos, Vec2::ZERO);
        assert_eq!(p.vel, Vec2::new(7.0, 7.0));
    }

    #[test]
    fn resolution_is_idempotent_for_resting_particle() {
        // Resting exactly on the left plane boundary with zero velocity.
        let mut p = particle_at(Vec2::new(85.0, 100.0), Vec2::ZERO, 5.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        let after_first = p.pos;
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.pos, after_first, "repeated resolution must not oscillate");
    }

    #[test]
    fn diagonal_contact_resolves_by_priority_order() {
        // Dead centre of the obstacle: every plane is within reach; top wins.
        let mut p = particle_at(Vec2::new(100.0, 100.0), Vec2::new(-50.0, 0.0), 5.0);
        resolve_particle_obstacle(&mut p, &obstacle(), 200.0);
        assert_eq!(p.vel.y, -200.0);
        assert_eq!(p.pos, Vec2::new(100.0, 100.0), "top response fired, not a side");
    }

    // ── World-level behaviour ─────────────────────────────────────────────────

    fn world_with_emitter() -> ParticleWorld {
        let mut world = ParticleWorld::new(16);
        world.add_emitter(crate::emitter::ParticleEmitter::new(
            Vec2::ZERO,
            Vec2::ZERO,
            MotionMode::Static,
            0.0,
            50.0,
            14.0,
            64,
        ));
        world
    }

    #[test]
    fn obstacle_ring_overwrites_after_capacity() {
        let mut world = ParticleWorld::new(4);
        for i in 0..6 {
            world.add_obstacle(Vec2::new(i as f32 * 10.0, 0.0), Vec2::splat(20.0), Color::WHITE);
        }
        assert_eq!(world.obstacle_count(), 4);
    }

    #[test]
    fn update_advances_emitters_and_resolves() {
        let mut world = world_with_emitter();
        // A floor under the emitter.
        world.add_obstacle(Vec2::new(-50.0, 50.0), Vec2::new(100.0, 20.0), Color::WHITE);
        let style = ParticleStyle::new(Span::fixed(2.0), 0.0, 60.0);
        let emission = CartesianEmission {
            vel_x: Span::fixed(0.0),
            vel_y: Span::fixed(200.0),
            random_sign_x: false,
            random_sign_y: false,
        };
        let mut rng = StdRng::seed_from_u64(7);
        world.emitter_mut(0).emit_cartesian(&mut rng, Vec2::ZERO, &emission, &style, 1);

        // Let the particle fall onto the floor; the top plane must eventually
        // throw it back upward.
        let mut bounced = false;
        for _ in 0..120 {
            world.update(1.0 / 60.0);
            if world.emitters()[0].particles().as_slice()[0].vel.y < 0.0 {
                bounced = true;
                break;
            }
        }
        assert!(bounced, "falling particle must bounce off the floor's top plane");
    }

    #[test]
    fn later_obstacle_overrides_earlier_resolution() {
        let mut world = world_with_emitter();
        // Two overlapping obstacles; the particle touches the left plane of
        // the first and sits inside the second, whose top plane then fires.
        world.add_obstacle(Vec2::new(90.0, 90.0), Vec2::new(20.0, 20.0), Color::WHITE);
        world.add_obstacle(Vec2::new(60.0, 95.0), Vec2::new(30.0, 30.0), Color::WHITE);
        let style = ParticleStyle::new(Span::fixed(5.0), 0.0, 60.0);
        world.emitter_mut(0).emit(
            Vec2::new(87.0, 100.0),
            Vec2::new(-50.0, 0.0),
            5.0,
            Color::WHITE,
            &style,
        );
        world.resolve_collisions();
        let p = world.emitters()[0].particles().as_slice()[0];
        // First obstacle pushed it to x = 85; the second obstacle's top plane
        // (y 95..104, x 63..87) then fired on the repositioned particle.
        assert_eq!(p.pos.x, 85.0);
        assert_eq!(p.vel.y, -world.top_bounce_impulse);
    }

    #[test]
    fn replace_obstacles_adopts_new_capacity() {
        let mut world = ParticleWorld::new(4);
        let mut loaded = RingBuffer::new(9);
        loaded.push(Obstacle::new(Vec2::ZERO, Vec2::splat(20.0), Color::WHITE));
        world.replace_obstacles(loaded);
        assert_eq!(world.obstacles().capacity(), 9);
        assert_eq!(world.obstacle_count(), 1);
    }
}
