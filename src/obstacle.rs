//! Static rectangular obstacles and their directional contact planes.
//!
//! Collision response is directional: instead of computing a contact normal,
//! each obstacle carries four pre-computed sub-rectangles (top, bottom, left,
//! right) and the resolver reacts according to which one a particle touches
//! first. The planes are strict subsets of the bounding rectangle — inset by
//! a margin along their long side so they cannot overlap at corners, and
//! limited in depth so a particle deep inside the rectangle still maps to
//! the nearest face.

use bevy::prelude::*;

use crate::constants::{CONTACT_PLANE_MARGIN, CONTACT_PLANE_THICKNESS};

/// Which face of an obstacle a particle contacted.
///
/// Variant order is the resolver's fixed priority order: the first plane that
/// reports an intersection wins and the rest are never tested. Diagonal
/// approaches that graze two planes therefore resolve by this order, not by
/// physical plausibility — an accepted approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPlane {
    Top,
    Bottom,
    Left,
    Right,
}

/// An axis-aligned rectangular obstacle (world coordinates, y-down).
///
/// Immutable after construction; the contact planes are derived once from
/// the bounding rectangle.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    /// Bounding rectangle.
    pub rect: Rect,
    /// Display colour.
    pub color: Color,
    top: Rect,
    bottom: Rect,
    left: Rect,
    right: Rect,
}

impl Obstacle {
    /// Creates an obstacle from its top-left corner and dimensions.
    pub fn new(pos: Vec2, dim: Vec2, color: Color) -> Self {
        let margin = CONTACT_PLANE_MARGIN;
        let depth = CONTACT_PLANE_THICKNESS;

        let rect = Rect::new(pos.x, pos.y, pos.x + dim.x, pos.y + dim.y);

        // Horizontal planes span the width minus a margin at each end;
        // vertical planes span the height the same way.
        let span_x = dim.x * (1.0 - margin * 2.0);
        let span_y = dim.y * (1.0 - margin * 2.0);

        let top = Rect::new(
            pos.x + dim.x * margin,
            pos.y,
            pos.x + dim.x * margin + span_x,
            pos.y + dim.y * depth,
        );
        let bottom = Rect::new(
            pos.x + dim.x * margin,
            pos.y + dim.y - dim.y * depth,
            pos.x + dim.x * margin + span_x,
            pos.y + dim.y,
        );
        let left = Rect::new(
            pos.x,
            pos.y + dim.y * margin,
            pos.x + dim.x * depth,
            pos.y + dim.y * margin + span_y,
        );
        let right = Rect::new(
            pos.x + dim.x - dim.x * depth,
            pos.y + dim.y * margin,
            pos.x + dim.x,
            pos.y + dim.y * margin + span_y,
        );

        Self {
            rect,
            color,
            top,
            bottom,
            left,
            right,
        }
    }

    /// The pre-computed sub-rectangle for one face.
    pub fn contact_rect(&self, plane: ContactPlane) -> Rect {
        match plane {
            ContactPlane::Top => self.top,
            ContactPlane::Bottom => self.bottom,
            ContactPlane::Left => self.left,
            ContactPlane::Right => self.right,
        }
    }

    /// Tests the disc against the four contact planes in priority order and
    /// returns the first hit, if any.
    pub fn first_contact(&self, center: Vec2, radius: f32) -> Option<ContactPlane> {
        const ORDER: [ContactPlane; 4] = [
            ContactPlane::Top,
            ContactPlane::Bottom,
            ContactPlane::Left,
            ContactPlane::Right,
        ];
        ORDER
            .into_iter()
            .find(|&plane| circle_intersects_rect(center, radius, self.contact_rect(plane)))
    }
}

/// Exact disc-vs-AABB intersection test: clamp the centre into the rectangle
/// and compare the residual distance against the radius.
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: Rect) -> bool {
    let closest = center.clamp(rect.min, rect.max);
    center.distance_squared(closest) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle() -> Obstacle {
        // 100×50 rectangle at (10, 20).
        Obstacle::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0), Color::WHITE)
    }

    // ── Contact plane geometry ────────────────────────────────────────────────

    #[test]
    fn planes_are_strict_subsets_of_bounds() {
        let o = obstacle();
        for plane in [
            ContactPlane::Top,
            ContactPlane::Bottom,
            ContactPlane::Left,
            ContactPlane::Right,
        ] {
            let r = o.contact_rect(plane);
            assert!(r.min.x >= o.rect.min.x && r.max.x <= o.rect.max.x, "{plane:?} x range");
            assert!(r.min.y >= o.rect.min.y && r.max.y <= o.rect.max.y, "{plane:?} y range");
            assert!(r.width() < o.rect.width() || r.height() < o.rect.height());
        }
    }

    #[test]
    fn top_plane_matches_margin_and_depth_fractions() {
        let o = obstacle();
        let top = o.contact_rect(ContactPlane::Top);
        assert_eq!(top.min, Vec2::new(10.0 + 100.0 * 0.1, 20.0));
        assert_eq!(top.width(), 100.0 * 0.8);
        assert_eq!(top.height(), 50.0 * 0.3);
    }

    #[test]
    fn side_planes_hug_the_vertical_edges() {
        let o = obstacle();
        let left = o.contact_rect(ContactPlane::Left);
        let right = o.contact_rect(ContactPlane::Right);
        assert_eq!(left.min.x, o.rect.min.x);
        assert_eq!(right.max.x, o.rect.max.x);
        assert_eq!(left.height(), 50.0 * 0.8);
    }

    // ── Disc-vs-rect test ─────────────────────────────────────────────────────

    #[test]
    fn circle_inside_rect_intersects() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_intersects_rect(Vec2::new(5.0, 5.0), 1.0, rect));
    }

    #[test]
    fn circle_touching_edge_intersects() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_intersects_rect(Vec2::new(-3.0, 5.0), 3.0, rect));
    }

    #[test]
    fn circle_clear_of_rect_misses() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!circle_intersects_rect(Vec2::new(-3.1, 5.0), 3.0, rect));
        // Corner distance is sqrt(2)·d, not d.
        assert!(!circle_intersects_rect(Vec2::new(-2.5, -2.5), 3.0, rect));
    }

    // ── Priority order ────────────────────────────────────────────────────────

    #[test]
    fn first_contact_prefers_top_over_sides() {
        let o = obstacle();
        // A disc fat enough to touch both the top and the left plane.
        let center = Vec2::new(o.rect.min.x + 1.0, o.rect.min.y + 1.0);
        let hit = o.first_contact(center, 30.0);
        assert_eq!(hit, Some(ContactPlane::Top), "top plane must win ties");
    }

    #[test]
    fn first_contact_reports_side_for_lateral_approach() {
        let o = obstacle();
        let mid_y = (o.rect.min.y + o.rect.max.y) / 2.0;
        let hit = o.first_contact(Vec2::new(o.rect.min.x - 2.0, mid_y), 3.0);
        assert_eq!(hit, Some(ContactPlane::Left));
    }

    #[test]
    fn first_contact_none_when_clear() {
        let o = obstacle();
        assert_eq!(o.first_contact(Vec2::new(-100.0, -100.0), 5.0), None);
    }
}
