// modubil_sim/src/simulation/core/app_state.rs

use bevy::ecs::schedule::SystemSet;

// =========================================================================
// == Per-Tick Vehicle Sets (The "Data Flow Graph") ==
// =========================================================================

/// Order of the vehicle systems inside `FixedUpdate`. Avian steps the world
/// afterwards, in `FixedPostUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleSet {
    /// Raycast every wheel and update its suspension load.
    Contact,
    /// Split the vehicle mass across its wheels by suspension load.
    MassDistribution,
    /// Turn driver input into per-wheel motor torque.
    Drivetrain,
    /// Run every wheel's friction model against its vehicle body.
    Friction,
    /// Write the accumulated force and torque back to Avian.
    Actuation,
}
