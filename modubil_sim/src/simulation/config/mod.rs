// modubil_sim/src/simulation/config/mod.rs

pub mod structs;

use std::path::Path;

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    Figment,
};

use self::structs::ScenarioConfig;

/// Reads and deserializes a scenario file.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, figment::Error> {
    Figment::new().merge(Toml::file(path)).extract()
}

/// Like `load_scenario`, but never fails: a broken or empty scenario is
/// logged and replaced by `ScenarioConfig::fallback()`.
pub fn load_scenario_or_fallback(path: &Path) -> ScenarioConfig {
    match load_scenario(path) {
        Ok(config) if config.vehicles.is_empty() => {
            warn!(
                "Scenario '{}' defines no vehicles. Spawning the fallback sedan.",
                path.display()
            );
            ScenarioConfig {
                vehicles: ScenarioConfig::fallback().vehicles,
                ..config
            }
        }
        Ok(config) => {
            info!(
                "Loaded scenario '{}' with {} vehicle(s).",
                path.display(),
                config.vehicles.len()
            );
            config
        }
        Err(e) => {
            error!(
                "Failed to load scenario '{}': {}. Using the fallback scenario.",
                path.display(),
                e
            );
            ScenarioConfig::fallback()
        }
    }
}
