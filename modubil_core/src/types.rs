// modubil_core/src/types.rs

use nalgebra::{Point3, Unit, Vector3};

// --- Core Identifiers ---

/// A generic, framework-agnostic identifier for a wheel.
/// In the Bevy sim, this holds the bits of the wheel's `Entity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct WheelId(pub u64);

impl WheelId {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }

    #[cfg(feature = "bevy")]
    pub fn to_entity(self) -> bevy_ecs::prelude::Entity {
        bevy_ecs::prelude::Entity::from_bits(self.0)
    }
}

/// Opaque reference to the surface (collider) a wheel is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceRef(pub u64);

/// Opaque reference to the body that owns the contacted surface, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyRef(pub u64);

// =========================================================================
// == Per-Tick Data ==
// =========================================================================

/// A single ground contact, produced at most once per tick per wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSample {
    /// World-space contact point.
    pub point: Point3<f64>,
    /// Surface normal at the contact point.
    pub normal: Unit<Vector3<f64>>,
    pub surface: Option<SurfaceRef>,
    /// `None` when the surface belongs to static geometry.
    pub body: Option<BodyRef>,
}

/// World-space pose of a wheel for one tick.
///
/// The basis is right-handed with `forward = up × right`, which is what
/// Bevy's `GlobalTransform::{right, up, forward}` produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelFrame {
    pub position: Point3<f64>,
    pub right: Unit<Vector3<f64>>,
    pub up: Unit<Vector3<f64>>,
    pub forward: Unit<Vector3<f64>>,
}

impl WheelFrame {
    /// Builds a frame from a position and two axes. `forward` is derived.
    pub fn new(position: Point3<f64>, right: Unit<Vector3<f64>>, up: Unit<Vector3<f64>>) -> Self {
        let forward = Unit::new_normalize(up.cross(&right));
        Self {
            position,
            right,
            up,
            forward,
        }
    }

    /// An axis-aligned frame: right = +X, up = +Y, forward = -Z.
    pub fn axis_aligned(position: Point3<f64>) -> Self {
        Self::new(position, Vector3::x_axis(), Vector3::y_axis())
    }
}

/// Snapshot of the rigid body state a `ForceAccumulator` works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub linear_velocity: Vector3<f64>,
    pub angular_velocity: Vector3<f64>,
    /// Total mass in kg.
    pub mass: f64,
    pub world_center_of_mass: Point3<f64>,
}

impl BodyState {
    /// A body at rest with its center of mass at `com`.
    pub fn at_rest(mass: f64, com: Point3<f64>) -> Self {
        Self {
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            mass,
            world_center_of_mass: com,
        }
    }
}
