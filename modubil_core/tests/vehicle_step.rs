// modubil_core/tests/vehicle_step.rs

use approx::{assert_abs_diff_eq, assert_relative_eq};
use modubil_core::prelude::*;
use nalgebra::{Point3, Vector3};

const DT: f64 = 0.02;
const VEHICLE_MASS: f64 = 1000.0;

#[derive(Debug)]
struct FixedMount(WheelFrame);

impl WheelMount for FixedMount {
    fn frame(&self) -> WheelFrame {
        self.0
    }
}

#[derive(Debug)]
struct FlatGround {
    contact: Option<ContactSample>,
}

impl ContactSensor for FlatGround {
    fn try_get_contact(&mut self) -> Option<ContactSample> {
        self.contact
    }
}

#[derive(Debug)]
struct FixedLoad(f64);

impl SuspensionLoad for FixedLoad {
    fn force_magnitude(&self) -> f64 {
        self.0
    }
}

struct WheelSetup {
    id: u64,
    name: &'static str,
    x: f64,
    z: f64,
    load: Option<f64>,
    grounded: bool,
    has_sensor: bool,
}

impl WheelSetup {
    fn new(id: u64, name: &'static str, x: f64, z: f64) -> Self {
        Self {
            id,
            name,
            x,
            z,
            load: Some(2500.0),
            grounded: true,
            has_sensor: true,
        }
    }
}

fn four_wheels() -> Vec<WheelSetup> {
    vec![
        WheelSetup::new(0, "front_left", -0.8, -1.4),
        WheelSetup::new(1, "front_right", 0.8, -1.4),
        WheelSetup::new(2, "rear_left", -0.8, 1.4),
        WheelSetup::new(3, "rear_right", 0.8, 1.4),
    ]
}

fn build_vehicle(setups: &[WheelSetup], config: FrictionConfig) -> Vehicle {
    let mut vehicle = Vehicle::new();
    for setup in setups {
        let frame = WheelFrame::axis_aligned(Point3::new(setup.x, 0.3, setup.z));
        let contact = setup.grounded.then(|| ContactSample {
            point: Point3::new(setup.x, 0.0, setup.z),
            normal: Vector3::y_axis(),
            surface: Some(SurfaceRef(99)),
            body: None,
        });
        let sensor: Option<Box<dyn ContactSensor>> = setup
            .has_sensor
            .then(|| Box::new(FlatGround { contact }) as Box<dyn ContactSensor>);
        let model = WheelFrictionModel::new(setup.name, config, Some(Wheel::default())).unwrap();
        let unit = WheelUnit::new(WheelId(setup.id), model, Box::new(FixedMount(frame)), sensor);
        let suspension = setup
            .load
            .map(|load| Box::new(FixedLoad(load)) as Box<dyn SuspensionLoad>);
        vehicle.add_wheel(unit, suspension);
    }
    vehicle
}

fn body_with_velocity(velocity: Vector3<f64>) -> ForceAccumulator {
    let mut state = BodyState::at_rest(VEHICLE_MASS, Point3::new(0.0, 0.5, 0.0));
    state.linear_velocity = velocity;
    ForceAccumulator::new(state)
}

#[test]
fn rear_wheel_drive_pushes_forward() {
    let mut vehicle = build_vehicle(&four_wheels(), FrictionConfig::default());
    assert!(vehicle.apply_torque(WheelId(2), 200.0));
    assert!(vehicle.apply_torque(WheelId(3), 200.0));
    assert!(!vehicle.apply_torque(WheelId(42), 200.0));

    let mut body = body_with_velocity(Vector3::new(0.0, 0.0, -3.0));
    let report = vehicle.step(&mut body, DT);

    assert_relative_eq!(report.allocation.total(), VEHICLE_MASS, max_relative = 1e-4);
    for (_, mass) in report.allocation.iter() {
        assert_abs_diff_eq!(mass, 250.0, epsilon = 1e-9);
    }
    assert_eq!(report.applied_count(), 4);

    // 200 N·m over a 0.25 m radius, on two wheels.
    assert_abs_diff_eq!(body.force(), Vector3::new(0.0, 0.0, -1600.0), epsilon = 1e-9);

    for unit in vehicle.wheels() {
        assert_abs_diff_eq!(unit.model().rpm(), 114.5916, epsilon = 1e-3);
        assert_abs_diff_eq!(unit.model().supported_mass(), 250.0, epsilon = 1e-9);
    }
}

#[test]
fn faulty_wheels_do_not_stop_the_others() {
    let mut setups = four_wheels();
    setups[0].has_sensor = false;
    setups[1].load = None;
    setups[2].load = Some(7500.0);
    let mut vehicle = build_vehicle(&setups, FrictionConfig::default());
    for id in 0..4 {
        vehicle.apply_torque(WheelId(id), 100.0);
    }

    let mut body = body_with_velocity(Vector3::zeros());
    let report = vehicle.step(&mut body, DT);

    assert_eq!(
        report.outcome(WheelId(0)),
        Some(&TickOutcome::Inert(MissingDependency::ContactSensor))
    );
    assert_eq!(report.allocation.get(WheelId(1)), Some(0.0));
    assert_abs_diff_eq!(report.allocation.get(WheelId(0)).unwrap(), 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.allocation.get(WheelId(2)).unwrap(), 600.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.allocation.get(WheelId(3)).unwrap(), 200.0, epsilon = 1e-9);
    assert_eq!(report.applied_count(), 3);
    assert_eq!(body.force_calls(), 3);
}

#[test]
fn airborne_vehicle_only_spins_wheels() {
    let mut setups = four_wheels();
    for setup in &mut setups {
        setup.grounded = false;
        setup.load = Some(0.0);
    }
    let mut vehicle = build_vehicle(&setups, FrictionConfig::default());
    vehicle.apply_torque(WheelId(2), 500.0);

    let mut body = body_with_velocity(Vector3::new(0.0, -1.0, 6.0));
    let report = vehicle.step(&mut body, DT);

    assert!(report.allocation.iter().all(|(_, mass)| mass == 0.0));
    assert!(report
        .outcomes
        .iter()
        .all(|(_, outcome)| *outcome == TickOutcome::NotGrounded));
    assert_eq!(body.force_calls(), 0);

    // Rolling backward at 6 m/s.
    let expected = -6.0 / (2.0 * std::f64::consts::PI * 0.25) * 60.0;
    for unit in vehicle.wheels() {
        assert_abs_diff_eq!(unit.model().rpm(), expected, epsilon = 1e-9);
    }
}

#[test]
fn lateral_slide_decays_without_overshoot() {
    let mut vehicle = build_vehicle(&four_wheels(), FrictionConfig::default());
    let mut velocity = Vector3::new(1.5, 0.0, -10.0);
    let mut previous_lateral = velocity.x;

    for _ in 0..50 {
        let mut body = body_with_velocity(velocity);
        vehicle.step(&mut body, DT);
        velocity += body.force() / VEHICLE_MASS * DT;

        assert!(velocity.x >= 0.0, "lateral velocity flipped sign: {}", velocity.x);
        assert!(velocity.x <= previous_lateral + 1e-12);
        previous_lateral = velocity.x;
    }

    assert!(velocity.x < 1.5);
    assert_abs_diff_eq!(velocity.z, -10.0, epsilon = 1e-9);
}
