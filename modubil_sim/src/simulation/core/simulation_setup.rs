// modubil_sim/src/simulation/core/simulation_setup.rs

use std::time::Duration;

use avian3d::prelude::Gravity;

use crate::prelude::*;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and set up time and ordering.
        let config = match app.world().get_resource::<ScenarioConfig>() {
            Some(config) => config.clone(),
            None => {
                warn!("No ScenarioConfig inserted before ModubilSimulationPlugin. Using the fallback scenario.");
                let config = ScenarioConfig::fallback();
                app.insert_resource(config.clone());
                config
            }
        };

        let time_step = match config.simulation.time_step() {
            Ok(step) => step,
            Err(e) => {
                warn!("{e}. Falling back to 50 Hz.");
                1.0 / 50.0
            }
        };
        app.insert_resource(
            // The resource is of type Time<Fixed>.
            Time::<Fixed>::from_duration(Duration::from_secs_f64(time_step)),
        );

        let [gx, gy, gz] = config.world.gravity;
        app.insert_resource(Gravity(Vec3::new(gx, gy, gz)));

        // --- CONFIGURE THE PER-TICK PIPELINE ---
        // Contact feeds the suspension load, which feeds mass distribution,
        // which feeds friction.
        app.configure_sets(
            FixedUpdate,
            (
                VehicleSet::Contact,
                VehicleSet::MassDistribution,
                VehicleSet::Drivetrain,
                VehicleSet::Friction,
                VehicleSet::Actuation,
            )
                .chain(),
        );

        if config.simulation.duration_seconds.is_some() {
            app.add_systems(Update, exit_after_duration);
        }
    }
}

/// Sends `AppExit` once the configured run time has elapsed.
fn exit_after_duration(
    time: Res<Time<Fixed>>,
    config: Res<ScenarioConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(limit) = config.simulation.duration_seconds else {
        return;
    };
    if time.elapsed_secs() >= limit {
        info!("Simulated {:.1} s. Exiting.", time.elapsed_secs());
        exit.write(AppExit::Success);
    }
}
