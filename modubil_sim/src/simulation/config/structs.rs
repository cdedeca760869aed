// modubil_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use modubil_core::prelude::{ConfigError, FrictionConfig, ModelError, Wheel};
use serde::Deserialize;

// --- Top-Level Scenario Structure ---

/// The complete scenario, deserialized from a TOML file.
#[derive(Resource, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

impl ScenarioConfig {
    /// The scenario used when no file could be loaded: one sedan on flat ground.
    pub fn fallback() -> Self {
        Self {
            vehicles: vec![VehicleConfig::sedan()],
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,
    /// Exit after this many seconds of simulated time. Runs forever when unset.
    #[serde(default)]
    pub duration_seconds: Option<f32>,
    /// Start with the wheel force gizmos visible.
    #[serde(default)]
    pub show_debug_forces: bool,
}

impl SimulationConfig {
    /// Seconds per fixed tick.
    pub fn time_step(&self) -> Result<f64, ConfigError> {
        let step = 1.0 / self.frequency_hz;
        if step.is_finite() && step > 0.0 {
            Ok(step)
        } else {
            Err(ConfigError::InvalidTimeStep(step))
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency_hz(),
            duration_seconds: None,
            show_debug_forces: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
    /// Edge length of the square ground plane, in meters.
    #[serde(default = "default_ground_size")]
    pub ground_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            ground_size: default_ground_size(),
        }
    }
}

// --- Vehicle Structures ---

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    pub name: String,
    /// Total mass in kg.
    pub mass: f64,
    #[serde(default)]
    pub spawn_position: [f32; 3],
    #[serde(default = "default_half_extents")]
    pub chassis_half_extents: [f32; 3],
    /// Center of mass marker, relative to the chassis origin. The collider's
    /// own center of mass is used when unset.
    #[serde(default)]
    pub center_of_mass: Option<[f32; 3]>,
    /// Peak motor torque in N·m, split evenly over the driven wheels.
    #[serde(default = "default_max_motor_torque")]
    pub max_motor_torque: f64,
    /// Shared by every wheel of this vehicle.
    #[serde(default)]
    pub friction: FrictionConfig,
    pub wheels: Vec<WheelConfig>,
}

impl VehicleConfig {
    /// Checks everything a spawned vehicle depends on. The first bad value wins.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.mass >= 0.0) {
            return Err(ConfigError::Negative {
                name: "vehicle mass",
                value: self.mass,
            }
            .into());
        }
        self.friction.validate()?;
        for wheel in &self.wheels {
            wheel.geometry.validate()?;
            wheel.suspension.validate()?;
        }
        Ok(())
    }

    /// A rear-wheel-drive car with the reference friction policy.
    pub fn sedan() -> Self {
        let wheel = |name: &str, x: f32, z: f32, driven: bool| WheelConfig {
            name: name.to_string(),
            position: [x, -0.1, z],
            geometry: Wheel::default(),
            driven,
            suspension: SuspensionConfig::default(),
        };
        Self {
            name: "sedan".to_string(),
            mass: 1200.0,
            spawn_position: [0.0, 1.0, 0.0],
            chassis_half_extents: default_half_extents(),
            center_of_mass: Some([0.0, -0.2, 0.0]),
            max_motor_torque: default_max_motor_torque(),
            friction: FrictionConfig::default(),
            wheels: vec![
                wheel("front_left", -0.8, -1.4, false),
                wheel("front_right", 0.8, -1.4, false),
                wheel("rear_left", -0.8, 1.4, true),
                wheel("rear_right", 0.8, 1.4, true),
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct WheelConfig {
    pub name: String,
    /// Suspension mount point, relative to the chassis origin.
    pub position: [f32; 3],
    #[serde(default)]
    pub geometry: Wheel,
    #[serde(default)]
    pub driven: bool,
    #[serde(default)]
    pub suspension: SuspensionConfig,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct SuspensionConfig {
    /// Spring length at zero load, from the mount to the wheel center.
    #[serde(default = "default_rest_length")]
    pub rest_length: f32,
    /// Maximum compression.
    #[serde(default = "default_travel")]
    pub travel: f32,
    /// N/m
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// N·s/m
    #[serde(default = "default_damping")]
    pub damping: f64,
}

impl SuspensionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("suspension rest_length", self.rest_length as f64),
            ("suspension travel", self.travel as f64),
            ("suspension stiffness", self.stiffness),
            ("suspension damping", self.damping),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}

impl Default for SuspensionConfig {
    fn default() -> Self {
        Self {
            rest_length: default_rest_length(),
            travel: default_travel(),
            stiffness: default_stiffness(),
            damping: default_damping(),
        }
    }
}

// --- Default value functions for Serde ---
fn default_frequency_hz() -> f64 {
    50.0
}
fn default_gravity() -> [f32; 3] {
    [0.0, -9.81, 0.0]
}
fn default_ground_size() -> f32 {
    500.0
}
fn default_half_extents() -> [f32; 3] {
    [0.9, 0.3, 2.1]
}
fn default_max_motor_torque() -> f64 {
    800.0
}
fn default_rest_length() -> f32 {
    0.45
}
fn default_travel() -> f32 {
    0.3
}
fn default_stiffness() -> f64 {
    35_000.0
}
fn default_damping() -> f64 {
    4_000.0
}
