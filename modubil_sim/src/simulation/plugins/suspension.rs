// modubil_sim/src/simulation/plugins/suspension.rs

//! Raycast wheel contact and a spring/damper suspension. These are the
//! Avian-backed implementations of `ContactSensor` and `SuspensionLoad`.

use avian3d::prelude::{SpatialQuery, SpatialQueryFilter};
use modubil_core::prelude::{BodyRef, ContactSample, ContactSensor, SurfaceRef, SuspensionLoad};
use nalgebra::Unit;

use crate::prelude::*;
use crate::simulation::core::convert::{vec3_to_point, vec3_to_vector};

pub struct SuspensionPlugin;

impl Plugin for SuspensionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, wheel_contact_system.in_set(VehicleSet::Contact));
    }
}

// --- Components ---

/// The ground contact found by this tick's raycast, if any.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WheelContact {
    pub sample: Option<ContactSample>,
}

impl ContactSensor for WheelContact {
    fn try_get_contact(&mut self) -> Option<ContactSample> {
        self.sample
    }
}

/// A linear spring/damper between the chassis mount and the wheel center.
#[derive(Component, Debug, Clone)]
pub struct Suspension {
    pub config: SuspensionConfig,
    /// Meters, `0..=travel`.
    pub compression: f64,
    /// Newtons, never negative.
    pub force: f64,
}

impl Suspension {
    pub fn new(config: SuspensionConfig) -> Self {
        Self {
            config,
            compression: 0.0,
            force: 0.0,
        }
    }

    /// Ray length from the mount: fully extended spring plus the wheel radius.
    pub fn max_ray_length(&self, radius: f64) -> f64 {
        self.config.rest_length as f64 + radius
    }

    /// Updates compression and force from a ray hit at `hit_distance` from the
    /// mount, or from no hit at all.
    pub fn update(&mut self, hit_distance: Option<f64>, radius: f64, dt: f64) {
        let rest = self.config.rest_length as f64;
        let travel = self.config.travel as f64;
        let compression = hit_distance
            .map(|distance| (rest - (distance - radius)).clamp(0.0, travel))
            .unwrap_or(0.0);

        let velocity = if dt > 0.0 {
            (compression - self.compression) / dt
        } else {
            0.0
        };
        self.force = spring_damper_force(
            compression,
            velocity,
            self.config.stiffness,
            self.config.damping,
        );
        self.compression = compression;
    }
}

impl SuspensionLoad for Suspension {
    fn force_magnitude(&self) -> f64 {
        self.force
    }
}

/// Hooke's law plus viscous damping. A suspension can only push, so the
/// result is clamped at zero.
pub fn spring_damper_force(
    compression: f64,
    compression_velocity: f64,
    stiffness: f64,
    damping: f64,
) -> f64 {
    (stiffness * compression + damping * compression_velocity).max(0.0)
}

// --- Systems ---

/// Casts a ray down each wheel's suspension axis and refreshes its contact
/// and load. The wheel's own chassis is excluded from the query. A wheel
/// without a suspension is treated as rigidly mounted: it touches the ground
/// whenever the ground is within one radius of the mount.
fn wheel_contact_system(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    mut wheels: Query<(
        &GlobalTransform,
        &WheelOf,
        &WheelFriction,
        Option<&mut Suspension>,
        &mut WheelContact,
    )>,
) {
    let dt = time.delta_secs_f64();

    for (transform, wheel_of, friction, mut suspension, mut contact) in &mut wheels {
        let Some(radius) = friction.0.wheel().map(|wheel| wheel.radius()) else {
            contact.sample = None;
            continue;
        };

        let origin = transform.translation();
        let direction = -transform.up();
        let filter = SpatialQueryFilter::from_excluded_entities([wheel_of.0]);

        let max_distance = suspension
            .as_ref()
            .map_or(radius, |suspension| suspension.max_ray_length(radius));
        let hit = spatial_query.cast_ray(origin, direction, max_distance as f32, true, &filter);

        let grounded = match suspension.as_mut() {
            Some(suspension) => {
                suspension.update(hit.as_ref().map(|hit| hit.distance as f64), radius, dt);
                suspension.compression > 0.0
            }
            None => hit.is_some(),
        };

        contact.sample = match hit {
            Some(hit) if grounded => {
                let point = origin + *direction * hit.distance;
                Some(ContactSample {
                    point: vec3_to_point(point),
                    normal: Unit::new_normalize(vec3_to_vector(hit.normal)),
                    surface: Some(SurfaceRef(hit.entity.to_bits())),
                    body: Some(BodyRef(hit.entity.to_bits())),
                })
            }
            _ => None,
        };
    }
}
