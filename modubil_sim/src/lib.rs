// modubil_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::debugging::DebuggingPlugin;
use crate::simulation::plugins::suspension::SuspensionPlugin;
use crate::simulation::plugins::vehicle::VehiclePlugin;
use crate::simulation::plugins::world::WorldPlugin;

// This prelude is for convenience for other files WITHIN the modubil_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// A binary only needs to insert a `ScenarioConfig` and add this plugin.
pub struct ModubilSimulationPlugin;

impl Plugin for ModubilSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Fixed timestep, system set ordering, run duration.
            SimulationSetupPlugin,
            // Ground plane, lighting, camera.
            WorldPlugin,
            // Raycast contact + spring/damper load per wheel.
            SuspensionPlugin,
            // Vehicle spawning, mass distribution, friction, drivetrain.
            VehiclePlugin,
            DebuggingPlugin,
        ));
    }
}
