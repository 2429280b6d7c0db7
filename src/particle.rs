//! A single point-mass particle.
//!
//! Particles are plain values that live inside an emitter's ring buffer —
//! they own nothing, hold no back-reference to their emitter, and are
//! recycled in place when their ring slot is overwritten.

use bevy::prelude::*;

/// One particle: a coloured disc with velocity and response coefficients.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World position (y-down).
    pub pos: Vec2,
    /// World velocity (units/s).
    pub vel: Vec2,
    /// Disc radius; always > 0.
    pub radius: f32,
    /// Draw colour, fixed at emission.
    pub color: Color,
    /// Per-tick velocity damping, (0, 1]. 1 = no damping.
    pub friction: f32,
    /// Collision response scale, [0, 1]. 1 = full response.
    pub elasticity: f32,
}

impl Particle {
    /// Creates a particle with no damping and full elasticity, the behaviour
    /// most emitter variants use.
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self::with_coefficients(pos, vel, radius, color, 1.0, 1.0)
    }

    /// Creates a particle with explicit friction and elasticity coefficients.
    pub fn with_coefficients(
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        color: Color,
        friction: f32,
        elasticity: f32,
    ) -> Self {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        Self {
            pos,
            vel,
            radius,
            color,
            friction,
            elasticity,
        }
    }

    /// Advances the particle by one tick.
    ///
    /// Order matters and is load-bearing for the demo's feel: damp, then
    /// integrate position, then accelerate. Gravity is per-tick (see
    /// `constants::GRAVITY`); `max_fall_speed` caps downward velocity so
    /// long falls cannot tunnel through contact planes.
    pub fn advance(&mut self, delta: f32, gravity: f32, max_fall_speed: f32) {
        self.vel *= self.friction;
        self.pos += self.vel * delta;
        self.vel.y += gravity;
        if self.vel.y > max_fall_speed {
            self.vel.y = max_fall_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GRAVITY, MAX_FALL_SPEED};

    #[test]
    fn advance_integrates_position_before_gravity() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, Color::WHITE);
        p.advance(1.0, GRAVITY, MAX_FALL_SPEED);
        // Gravity lands on velocity after integration, so the first tick's
        // displacement sees none of it.
        assert_eq!(p.pos, Vec2::new(10.0, 0.0));
        assert_eq!(p.vel, Vec2::new(10.0, GRAVITY));
    }

    #[test]
    fn fall_speed_converges_monotonically_to_cap() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0, Color::WHITE);
        let mut prev = p.vel.y;
        for _ in 0..100 {
            p.advance(1.0 / 60.0, GRAVITY, MAX_FALL_SPEED);
            assert!(p.vel.y >= prev, "fall speed must never decrease in free fall");
            assert!(p.vel.y <= MAX_FALL_SPEED, "fall speed must never exceed the cap");
            prev = p.vel.y;
        }
        assert_eq!(p.vel.y, MAX_FALL_SPEED, "100 ticks of gravity 20 must reach the cap");
    }

    #[test]
    fn friction_damps_both_axes() {
        let mut p = Particle::with_coefficients(
            Vec2::ZERO,
            Vec2::new(100.0, -100.0),
            1.0,
            Color::WHITE,
            0.5,
            1.0,
        );
        p.advance(0.0, 0.0, MAX_FALL_SPEED);
        assert_eq!(p.vel, Vec2::new(50.0, -50.0));
    }

    #[test]
    fn default_coefficients_are_identity() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0, Color::WHITE);
        assert_eq!(p.friction, 1.0);
        assert_eq!(p.elasticity, 1.0);
    }
}
