// modubil_core/src/body.rs

use nalgebra::{Isometry3, Point3, Vector3};

use crate::abstractions::PhysicsBody;
use crate::types::BodyState;

/// A `PhysicsBody` over a snapshot of the rigid body that sums every force
/// the wheels add during one tick.
///
/// Engine adapters build one per vehicle per tick, hand it to every wheel in
/// turn, then write `force()` / `torque()` back into the engine as a single
/// net force and torque about the center of mass.
#[derive(Debug, Clone)]
pub struct ForceAccumulator {
    state: BodyState,
    force: Vector3<f64>,
    torque: Vector3<f64>,
    force_calls: usize,
}

impl ForceAccumulator {
    pub fn new(state: BodyState) -> Self {
        Self {
            state,
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
            force_calls: 0,
        }
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    /// Net force accumulated this tick.
    pub fn force(&self) -> Vector3<f64> {
        self.force
    }

    /// Net torque about the world center of mass accumulated this tick.
    pub fn torque(&self) -> Vector3<f64> {
        self.torque
    }

    /// How many times a force was added.
    pub fn force_calls(&self) -> usize {
        self.force_calls
    }
}

impl PhysicsBody for ForceAccumulator {
    fn point_velocity(&self, world_position: &Point3<f64>) -> Vector3<f64> {
        let r = world_position - self.state.world_center_of_mass;
        self.state.linear_velocity + self.state.angular_velocity.cross(&r)
    }

    fn mass(&self) -> f64 {
        self.state.mass
    }

    fn world_center_of_mass(&self) -> Point3<f64> {
        self.state.world_center_of_mass
    }

    fn add_force(&mut self, force: &Vector3<f64>) {
        self.force += force;
        self.force_calls += 1;
    }

    fn add_force_at_position(&mut self, force: &Vector3<f64>, position: &Point3<f64>) {
        let r = position - self.state.world_center_of_mass;
        self.force += force;
        self.torque += r.cross(force);
        self.force_calls += 1;
    }
}

/// Expresses a world-space marker position in the body's local frame, for use
/// as the body's center of mass.
pub fn center_of_mass_from_marker(
    body_pose: &Isometry3<f64>,
    marker_world_position: &Point3<f64>,
) -> Point3<f64> {
    body_pose.inverse_transform_point(marker_world_position)
}
