// modubil_sim/src/simulation/plugins/debugging/systems.rs

use bevy::prelude::*;
use modubil_core::prelude::ForceTarget;

use super::components::ShowDebugGizmos;
use crate::prelude::*;
use crate::simulation::core::convert::{point_to_vec3, vector_to_vec3};

/// Meters of arrow per newton.
const FORCE_SCALE: f32 = 1.0e-3;

// =========================================================================
// == Toggle Systems (Hotkeys) ==
// =========================================================================

/// Turns the wheel gizmos on at startup when the scenario asks for them.
pub fn enable_configured_gizmos(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    wheels: Query<Entity, With<WheelFriction>>,
) {
    if !config.simulation.show_debug_forces {
        return;
    }
    for entity in &wheels {
        commands.entity(entity).insert(ShowDebugGizmos);
    }
}

/// Toggles the `ShowDebugGizmos` component on all wheels with the F2 key.
pub fn toggle_wheel_force_gizmos(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(Entity, Option<&ShowDebugGizmos>), With<WheelFriction>>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        let are_any_on = query.iter().any(|(_, gizmo_opt)| gizmo_opt.is_some());
        for (entity, _) in &query {
            if are_any_on {
                commands.entity(entity).remove::<ShowDebugGizmos>();
            } else {
                commands.entity(entity).insert(ShowDebugGizmos);
            }
        }
        info!(
            "[Debug] Toggled wheel force visuals {}",
            if are_any_on { "OFF" } else { "ON" }
        );
    }
}

// =========================================================================
// == Drawing Systems ==
// =========================================================================

/// Draws the last applied wheel force: white for the capped total, red for
/// the lateral part and green for traction.
pub fn draw_wheel_forces(
    mut gizmos: Gizmos,
    wheels: Query<(&GlobalTransform, &WheelFriction), With<ShowDebugGizmos>>,
) {
    for (transform, friction) in &wheels {
        let Some(applied) = friction.0.last_outcome().and_then(|o| o.applied()) else {
            continue;
        };
        let origin = match applied.target {
            ForceTarget::Point(point) => point_to_vec3(&point),
            ForceTarget::CenterOfMass => transform.translation(),
        };

        gizmos.arrow(
            origin,
            origin + vector_to_vec3(&applied.force) * FORCE_SCALE,
            Color::WHITE,
        );
        gizmos.line(
            origin,
            origin + vector_to_vec3(&applied.lateral) * FORCE_SCALE,
            Color::srgb(1.0, 0.2, 0.2),
        );
        gizmos.line(
            origin,
            origin + vector_to_vec3(&applied.traction) * FORCE_SCALE,
            Color::srgb(0.2, 1.0, 0.2),
        );
    }
}

/// Draws each wheel's suspension ray down to the contact, yellow when
/// grounded and grey when hanging.
pub fn draw_suspension_rays(
    mut gizmos: Gizmos,
    wheels: Query<(&GlobalTransform, &WheelFriction, &Suspension, &WheelContact), With<ShowDebugGizmos>>,
) {
    for (transform, friction, suspension, contact) in &wheels {
        let origin = transform.translation();
        match contact.sample {
            Some(sample) => {
                let point = point_to_vec3(&sample.point);
                gizmos.line(origin, point, Color::srgb(1.0, 0.9, 0.1));
                gizmos.sphere(Isometry3d::from_translation(point), 0.05, Color::srgb(1.0, 0.9, 0.1));
            }
            None => {
                let radius = friction.0.wheel().map_or(0.0, |w| w.radius());
                let length = suspension.max_ray_length(radius) as f32;
                gizmos.line(origin, origin - *transform.up() * length, Color::srgb(0.5, 0.5, 0.5));
            }
        }
    }
}
