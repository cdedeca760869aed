// modubil_sim/examples/01_drive.rs

//! Drive a vehicle on flat ground with the arrow keys.
//!
//! This example demonstrates how to:
//! 1. Parse the command line and load a scenario TOML file.
//! 2. Set up Bevy and Avian, with or without a window.
//! 3. Add the `ModubilSimulationPlugin`, which spawns and simulates the vehicles.
//! 4. Feed keyboard input into the vehicles' `DriverInput` mailbox.
//!
//! To run this example:
//! `cargo run --example 01_drive -- --scenario assets/scenarios/sedan.toml`
//!
//! Press F2 to toggle the wheel force gizmos.

use std::time::Duration;

// --- Bevy Imports ---
use avian3d::prelude::*;
use bevy::{
    app::ScheduleRunnerPlugin,
    log::LogPlugin,
    prelude::*,
    window::ExitCondition,
    winit::WinitPlugin,
};
use clap::Parser;

// --- Project-Specific Imports ---
use modubil_sim::cli::Cli;
use modubil_sim::simulation::config::load_scenario_or_fallback;
use modubil_sim::simulation::core::components::DriverInput;
use modubil_sim::ModubilSimulationPlugin;

fn main() {
    let cli = Cli::parse();

    // --- 1. Load Simulation Configuration ---
    let config = load_scenario_or_fallback(&cli.scenario);

    let log_plugin = LogPlugin {
        level: bevy::log::Level::INFO,
        // A good filter for focusing on our crates' logs during development.
        filter: "info,wgpu_core=error,wgpu_hal=error,modubil_sim=debug,modubil_core=debug"
            .to_string(),
        ..default()
    };

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    if cli.headless {
        app.add_plugins(
            DefaultPlugins
                .set(log_plugin)
                .set(WindowPlugin {
                    primary_window: None,
                    exit_condition: ExitCondition::DontExit,
                    ..default()
                })
                .disable::<WinitPlugin>(),
        )
        .add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        )));
    } else {
        app.add_plugins(DefaultPlugins.set(log_plugin))
            // An Avian3D plugin to visualize colliders for debugging.
            .add_plugins(PhysicsDebugPlugin::default());
    }

    app
        // The Avian3D physics plugins.
        .add_plugins(PhysicsPlugins::default())
        // Insert the loaded configuration as a Bevy resource so all systems can access it.
        .insert_resource(config)
        .insert_resource(cli);

    // --- 3. Add the Main Simulation Plugin ---
    app.add_plugins(ModubilSimulationPlugin);

    // --- 4. Add Example-Specific Systems ---
    app.add_systems(Update, keyboard_controller);

    app.run();
}

/// Reads the arrow keys into every vehicle's `DriverInput`.
fn keyboard_controller(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut DriverInput>,
) {
    for mut controller in &mut query {
        controller.throttle = 0.0;
        if keyboard_input.pressed(KeyCode::ArrowUp) {
            controller.throttle = 1.0;
        }
        if keyboard_input.pressed(KeyCode::ArrowDown) {
            controller.throttle = -1.0;
        }
    }
}
