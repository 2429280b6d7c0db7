//! Draw pass: gizmo rendering of the world plus the toggleable info overlay.
//!
//! Every system here reads `ParticleWorld` immutably and runs strictly after
//! `world_update_system` (chained in `SimulationPlugin`), so the draw never
//! observes a partially updated frame.

use bevy::prelude::*;

use crate::obstacle::ContactPlane;
use crate::simulation::SessionState;
use crate::viewport::Viewport;
use crate::world::ParticleWorld;

/// Marker for the info overlay text node.
#[derive(Component)]
pub struct InfoText;

/// Startup: spawn the (initially hidden) info overlay in the top-left corner.
pub fn setup_info_text(mut commands: Commands) {
    commands.spawn((
        InfoText,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..Default::default()
        },
        Visibility::Hidden,
    ));
    println!("[SETUP] Info overlay spawned");
}

/// Draws obstacles, particles, and emitter markers through the viewport
/// transform.
pub fn draw_world_system(
    mut gizmos: Gizmos,
    world: Res<ParticleWorld>,
    viewport: Res<Viewport>,
    session: Res<SessionState>,
) {
    // Obstacles first so particles draw over them.
    for obstacle in world.obstacles() {
        let center = viewport.world_to_render(obstacle.rect.center());
        let size = Vec2::new(
            viewport.scale(obstacle.rect.width()),
            viewport.scale(obstacle.rect.height()),
        );
        gizmos.rect_2d(center, size, obstacle.color);

        // Debug overlay: show the directional contact planes.
        if session.show_info {
            for (plane, color) in [
                (ContactPlane::Top, Color::srgb(0.2, 0.9, 0.2)),
                (ContactPlane::Bottom, Color::srgb(0.9, 0.2, 0.2)),
                (ContactPlane::Left, Color::srgb(0.2, 0.4, 0.9)),
                (ContactPlane::Right, Color::srgb(0.9, 0.9, 0.2)),
            ] {
                let rect = obstacle.contact_rect(plane);
                gizmos.rect_2d(
                    viewport.world_to_render(rect.center()),
                    Vec2::new(viewport.scale(rect.width()), viewport.scale(rect.height())),
                    color,
                );
            }
        }
    }

    for emitter in world.emitters() {
        for particle in emitter.particles() {
            gizmos.circle_2d(
                viewport.world_to_render(particle.pos),
                viewport.scale(particle.radius),
                particle.color,
            );
        }
    }

    // Emitter markers over everything: disc plus launch-angle indicator.
    for emitter in world.emitters() {
        let center = viewport.world_to_render(emitter.pos);
        let marker_color = if emitter.dragging {
            Color::srgb(1.0, 0.6, 0.1)
        } else if emitter.mouse_over {
            Color::srgb(1.0, 1.0, 0.4)
        } else {
            Color::srgba(1.0, 1.0, 1.0, 0.6)
        };
        gizmos.circle_2d(center, viewport.scale(emitter.grab_radius), marker_color);

        // Launch direction in world space (0° points down-screen).
        let theta = emitter.launch_angle.to_radians();
        let tip = emitter.pos + Vec2::new(theta.sin(), theta.cos()) * emitter.grab_radius * 1.6;
        gizmos.line_2d(center, viewport.world_to_render(tip), marker_color);
    }
}

/// Refreshes the info overlay text and visibility (F1 to toggle).
pub fn info_display_system(
    world: Res<ParticleWorld>,
    viewport: Res<Viewport>,
    session: Res<SessionState>,
    mut query: Query<(&mut Text, &mut Visibility), With<InfoText>>,
) {
    let Ok((mut text, mut visibility)) = query.single_mut() else {
        return;
    };
    if !session.show_info {
        *visibility = Visibility::Hidden;
        return;
    }
    *visibility = Visibility::Visible;
    text.0 = format!(
        "particles: {}\nobstacles: {}/{}\nzoom: {:.2}",
        world.particle_count(),
        world.obstacle_count(),
        world.obstacles().capacity(),
        viewport.zoom,
    );
}
