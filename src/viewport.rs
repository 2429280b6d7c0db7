//! Pan/zoom camera state and the screen/world/render coordinate transforms.
//!
//! Three spaces are in play:
//! - **world**: the simulation's y-down space, origin at the top-left of the
//!   unpanned, unzoomed view. All simulation state lives here.
//! - **screen**: window pixels, origin top-left, y-down — what
//!   `Window::cursor_position` reports.
//! - **render**: Bevy's y-up gizmo space, origin at the window centre. Used
//!   only at draw time.
//!
//! The camera is an explicit resource rather than process-wide state so the
//! input systems and tests can manipulate it directly.

use bevy::prelude::*;

use crate::constants::{MAX_ZOOM, MIN_ZOOM, WINDOW_HEIGHT, WINDOW_WIDTH, ZOOM_STEP};

/// Pan/zoom state plus the window size needed for the render-space flip.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Viewport {
    /// World position of the top-left screen corner.
    pub offset: Vec2,
    /// Screen pixels per world unit; always positive.
    pub zoom: f32,
    /// Window size in pixels.
    pub window: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            window: Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        }
    }
}

impl Viewport {
    /// Converts a cursor position to simulation coordinates.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.offset
    }

    /// Converts simulation coordinates to window pixels.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.offset) * self.zoom
    }

    /// Converts simulation coordinates to Bevy's centred, y-up gizmo space.
    pub fn world_to_render(&self, world: Vec2) -> Vec2 {
        let screen = self.world_to_screen(world);
        Vec2::new(
            screen.x - self.window.x / 2.0,
            self.window.y / 2.0 - screen.y,
        )
    }

    /// Scales a world-space length (radius, rectangle side) to render space.
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }

    /// One discrete zoom step in. Clamped to `MAX_ZOOM`.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    /// One discrete zoom step out. The `MIN_ZOOM` floor keeps the transform
    /// invertible.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Moves the camera by a world-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}
