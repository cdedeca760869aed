// modubil_sim/src/simulation/core/components.rs

use bevy::prelude::{Component, Entity};
use modubil_core::prelude::WheelFrictionModel;
use nalgebra::Vector3;

// --- Wrapper Components for Core Models ---

/// A Bevy component that wraps the pure friction model of one wheel.
#[derive(Component, Debug)]
pub struct WheelFriction(pub WheelFrictionModel);

// --- Vehicle Wiring ---

/// Attached to a chassis. Lists its wheel entities in spawn order, so the
/// per-tick systems never search the hierarchy.
#[derive(Component, Debug, Default)]
pub struct VehicleAssembly {
    pub wheels: Vec<Entity>,
}

/// Back-reference from a wheel to the chassis it belongs to.
#[derive(Component, Debug, Clone, Copy)]
pub struct WheelOf(pub Entity);

/// Marks a wheel that receives motor torque.
#[derive(Component, Debug, Default)]
pub struct DrivenWheel;

/// A "mailbox" component that input systems (keyboard, scripts) write into.
#[derive(Component, Debug, Default)]
pub struct DriverInput {
    /// -1.0 (full reverse) ..= 1.0 (full forward).
    pub throttle: f32,
}

#[derive(Component, Debug, Default)]
pub struct Drivetrain {
    pub max_motor_torque: f64,
    /// Mean RPM of the driven wheels at the end of the last tick.
    pub average_rpm: f64,
}

/// Net force and torque the wheels produced on the last tick, kept for
/// diagnostics after they are handed to Avian.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WheelForceTotals {
    pub force: Vector3<f64>,
    pub torque: Vector3<f64>,
}

/// A child of the chassis whose world position becomes the chassis center
/// of mass once transforms have propagated.
#[derive(Component, Debug)]
pub struct CenterOfMassMarker {
    pub body: Entity,
    pub applied: bool,
}
