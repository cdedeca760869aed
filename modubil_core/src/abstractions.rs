// modubil_core/src/abstractions.rs

use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

use crate::types::{ContactSample, WheelFrame};

// --- CONTACT SENSOR TRAIT ---
/// Per-wheel ground contact query. Raycasts, shape casts or scripted test
/// fixtures all implement this.
pub trait ContactSensor: Debug + Send + Sync {
    /// Returns the current ground contact, or `None` when the wheel is airborne.
    /// Called at most once per tick per wheel.
    fn try_get_contact(&mut self) -> Option<ContactSample>;
}

// --- SUSPENSION TRAIT ---
/// Instantaneous spring + damper force of one wheel's suspension.
pub trait SuspensionLoad: Debug + Send + Sync {
    /// Force magnitude in newtons. Implementations must return a value `>= 0`.
    fn force_magnitude(&self) -> f64;
}

// --- RIGID BODY TRAIT ---
/// The physics-engine operations the friction model depends on.
///
/// All wheels of a vehicle write into the same body during one tick. The
/// `&mut` receiver on the force methods is the single-writer discipline: a
/// caller that wants to process wheels in parallel has to serialize access.
pub trait PhysicsBody {
    /// World-space velocity of the body at `world_position`.
    fn point_velocity(&self, world_position: &Point3<f64>) -> Vector3<f64>;

    /// Total mass in kg.
    fn mass(&self) -> f64;

    fn world_center_of_mass(&self) -> Point3<f64>;

    /// Adds a force through the center of mass (no torque).
    fn add_force(&mut self, force: &Vector3<f64>);

    /// Adds a force at a world-space point, producing torque about the center of mass.
    fn add_force_at_position(&mut self, force: &Vector3<f64>, position: &Point3<f64>);
}

// --- WHEEL MOUNT TRAIT ---
/// Supplies the wheel's world pose each tick (the scene graph's job).
pub trait WheelMount: Debug + Send + Sync {
    fn frame(&self) -> WheelFrame;
}

// --- DRIVETRAIN CONTRACTS ---

/// A wheel that accepts drive torque from a drivetrain.
pub trait PoweredWheel {
    /// Sets the commanded motor torque in N·m. The sign selects the direction.
    fn apply_torque(&mut self, torque: f64);
}

/// A wheel that reports its rotational speed back to a drivetrain.
pub trait RpmProvider {
    /// Signed revolutions per minute.
    fn rpm(&self) -> f64;
}
