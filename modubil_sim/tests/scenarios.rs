// modubil_sim/tests/scenarios.rs

use std::path::PathBuf;

use modubil_core::prelude::{FrictionConfig, LateralMode, TractionLimit, WheelFrictionModel};
use modubil_sim::simulation::config::load_scenario;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets/scenarios")
        .join(name)
}

#[test]
fn sedan_scenario_builds_valid_wheels() {
    let config = load_scenario(&scenario_path("sedan.toml")).unwrap();
    assert_eq!(config.vehicles.len(), 1);

    let sedan = &config.vehicles[0];
    assert_eq!(sedan.wheels.len(), 4);
    assert_eq!(sedan.wheels.iter().filter(|w| w.driven).count(), 2);
    assert_eq!(sedan.friction.lateral_mode, LateralMode::MassProportional);
    assert!(sedan.friction.use_slip_ratio_gate);

    for wheel in &sedan.wheels {
        let model = WheelFrictionModel::new(&wheel.name, sedan.friction, Some(wheel.geometry));
        assert!(model.unwrap().is_active());
    }
}

#[test]
fn kart_scenario_uses_alternate_policies() {
    let config = load_scenario(&scenario_path("kart_fixed_grip.toml")).unwrap();
    let kart = &config.vehicles[0];

    assert_eq!(config.simulation.duration_seconds, Some(30.0));
    assert!(!kart.friction.use_slip_ratio_gate);
    assert_eq!(
        kart.friction.lateral_mode,
        LateralMode::FixedMultiplier { coefficient: 60.0 }
    );
    assert_eq!(
        kart.friction.traction_limit,
        TractionLimit::DrivetrainRatio { ratio: 4.0 }
    );
    // Everything not named in the file keeps the reference default.
    assert_eq!(kart.friction.force_cap, FrictionConfig::default().force_cap);
    assert!(kart.friction.validate().is_ok());
}
