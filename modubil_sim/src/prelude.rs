// modubil_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire modubil_core prelude so you can easily access
// pure types like `WheelFrictionModel`, `ContactSensor`, `WheelId`, etc.
pub use modubil_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::VehicleSet;
pub use crate::simulation::core::components::{
    DriverInput, Drivetrain, DrivenWheel, VehicleAssembly, WheelFriction, WheelOf,
};
pub use crate::simulation::plugins::suspension::{Suspension, WheelContact};
