// modubil_core/src/friction/forces.rs

//! Pure force math for one wheel and one tick. Nothing here touches the
//! rigid body; `WheelFrictionModel` decides what gets applied.

use nalgebra::{Point3, Unit, Vector3};

use crate::friction::config::{FrictionConfig, LateralMode, TractionBasis, TractionLimit};
use crate::math::{project, safe_normalize};
use crate::types::WheelFrame;

/// Wheel-relative decomposition of the point velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlipState {
    /// Component of the point velocity along the wheel's right axis.
    pub lateral_velocity: Vector3<f64>,
    /// Component of the point velocity along the wheel's forward axis.
    pub forward_velocity: Vector3<f64>,
    /// `(forward + lateral) / 2`, the reference direction for the lateral reaction.
    pub slip: Vector3<f64>,
}

impl SlipState {
    /// `|v_lateral| / |v_forward|`, or `None` when the forward speed is below
    /// `min_forward_speed`.
    pub fn slip_ratio(&self, min_forward_speed: f64) -> Option<f64> {
        let forward_speed = self.forward_velocity.norm();
        if forward_speed < min_forward_speed || forward_speed == 0.0 {
            return None;
        }
        Some(self.lateral_velocity.norm() / forward_speed)
    }
}

pub fn decompose(point_velocity: &Vector3<f64>, frame: &WheelFrame) -> SlipState {
    let lateral_velocity = project(point_velocity, &frame.right);
    let forward_velocity = project(point_velocity, &frame.forward);
    SlipState {
        lateral_velocity,
        forward_velocity,
        slip: (forward_velocity + lateral_velocity) / 2.0,
    }
}

/// Lateral acceleration before mass scaling and gating.
///
/// Both modes point against the slip vector's lateral part so the reaction
/// resists further drift. `MassProportional` uses the quadratic magnitude
/// `|project(right, slip)| × |v_lateral|²`; `FixedMultiplier` uses the slip
/// magnitude `|project(slip, v_lateral)|` itself.
pub fn lateral_acceleration(
    state: &SlipState,
    right: &Unit<Vector3<f64>>,
    mode: LateralMode,
) -> Vector3<f64> {
    let lateral_slip = project(&state.slip, &state.lateral_velocity);
    let direction = -safe_normalize(&lateral_slip);
    let magnitude = match mode {
        LateralMode::MassProportional => {
            project(right, &state.slip).norm() * state.lateral_velocity.norm_squared()
        }
        LateralMode::FixedMultiplier { .. } => lateral_slip.norm(),
    };
    direction * magnitude
}

/// The cornering force for one tick, already divided by `dt`.
pub fn lateral_force(
    state: &SlipState,
    frame: &WheelFrame,
    config: &FrictionConfig,
    supported_mass: f64,
    dt: f64,
) -> Vector3<f64> {
    let mut acceleration = lateral_acceleration(state, &frame.right, config.lateral_mode);

    if config.use_slip_ratio_gate {
        match state.slip_ratio(config.min_forward_speed) {
            Some(ratio) if ratio >= config.slip_ratio_epsilon => {
                // Never push harder than what cancels the lateral velocity in one tick.
                let limit = state.lateral_velocity.norm();
                let magnitude = acceleration.norm();
                if magnitude > limit {
                    acceleration *= limit / magnitude;
                }
            }
            _ => return Vector3::zeros(),
        }
    }

    let scale = match config.lateral_mode {
        LateralMode::MassProportional => supported_mass,
        LateralMode::FixedMultiplier { coefficient } => coefficient,
    };

    acceleration * scale / dt
}

/// Direction traction is applied along, flipped for negative torque.
pub fn traction_direction(
    frame: &WheelFrame,
    normal: &Unit<Vector3<f64>>,
    basis: TractionBasis,
    motor_torque: f64,
) -> Vector3<f64> {
    let direction = match basis {
        TractionBasis::ContactNormal => safe_normalize(&normal.cross(&frame.right)),
        TractionBasis::WheelForward => frame.forward.into_inner(),
    };
    if motor_torque < 0.0 {
        -direction
    } else {
        direction
    }
}

/// Traction magnitude: `|torque| / radius`, clamped by the configured limit.
pub fn traction_magnitude(
    motor_torque: f64,
    radius: f64,
    config: &FrictionConfig,
    lateral_magnitude: f64,
    supported_mass: f64,
) -> f64 {
    let motor_force = (motor_torque / radius).abs();
    let max_forward_friction = match config.traction_limit {
        TractionLimit::TorqueOnly => motor_force,
        TractionLimit::LateralBudget => config
            .force_cap
            .map_or(motor_force, |cap| (cap - lateral_magnitude).max(0.0)),
        TractionLimit::Coefficient { mu } => mu * supported_mass.max(0.0) * config.gravity,
        TractionLimit::DrivetrainRatio { ratio } => motor_torque.abs() * ratio,
    };
    motor_force.clamp(0.0, max_forward_friction.max(0.0))
}

/// Raises the contact point along the wheel's up axis toward the center of
/// mass height. `offset` 0 keeps the contact, 1 reaches the COM height; the
/// horizontal footprint never moves.
pub fn application_point(
    contact: &Point3<f64>,
    center_of_mass: &Point3<f64>,
    up: &Unit<Vector3<f64>>,
    offset: f64,
) -> Point3<f64> {
    let height = (center_of_mass - contact).dot(up);
    contact + up.into_inner() * (height * offset)
}

/// Rescales `force` to `cap` if it is longer. Returns whether it was rescaled.
pub fn clamp_to_cap(force: Vector3<f64>, cap: Option<f64>) -> (Vector3<f64>, bool) {
    match cap {
        Some(cap) if force.norm() > cap => (safe_normalize(&force) * cap, true),
        _ => (force, false),
    }
}

/// Wheel RPM from the forward component of the point velocity.
pub fn rpm(point_velocity: &Vector3<f64>, forward: &Unit<Vector3<f64>>, radius: f64) -> f64 {
    let forward_speed = point_velocity.dot(forward);
    let rotations_per_second = forward_speed / (2.0 * std::f64::consts::PI * radius);
    rotations_per_second * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn frame() -> WheelFrame {
        WheelFrame::axis_aligned(Point3::new(1.0, 0.5, -2.0))
    }

    /// World velocity made of `forward` m/s along the wheel and `lateral` m/s to its right.
    fn velocity(forward: f64, lateral: f64) -> Vector3<f64> {
        let f = frame();
        f.forward.into_inner() * forward + f.right.into_inner() * lateral
    }

    #[test]
    fn decompose_splits_axes() {
        let state = decompose(&(velocity(10.0, 2.0) + Vector3::new(0.0, 3.0, 0.0)), &frame());
        assert_abs_diff_eq!(state.forward_velocity, Vector3::new(0.0, 0.0, -10.0), epsilon = 1e-12);
        assert_abs_diff_eq!(state.lateral_velocity, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(state.slip, Vector3::new(1.0, 0.0, -5.0), epsilon = 1e-12);
    }

    #[test]
    fn lateral_acceleration_opposes_drift() {
        let f = frame();
        let state = decompose(&velocity(10.0, 2.0), &f);
        let a = lateral_acceleration(&state, &f.right, LateralMode::MassProportional);

        // |project(right, slip)| = 1 / sqrt(26), times |v_lat|² = 4.
        let expected = 4.0 / 26.0_f64.sqrt();
        assert_relative_eq!(a.norm(), expected, max_relative = 1e-12);
        assert!(a.dot(&f.right) < 0.0);
    }

    #[test]
    fn zero_slip_gives_zero_lateral() {
        let f = frame();
        let state = decompose(&Vector3::zeros(), &f);
        let config = FrictionConfig::ungated();
        assert_eq!(lateral_force(&state, &f, &config, 400.0, 0.02), Vector3::zeros());

        let config = FrictionConfig::default();
        assert_eq!(lateral_force(&state, &f, &config, 400.0, 0.02), Vector3::zeros());
    }

    #[test]
    fn pure_forward_motion_gives_zero_lateral() {
        let f = frame();
        let state = decompose(&velocity(25.0, 0.0), &f);
        let force = lateral_force(&state, &f, &FrictionConfig::ungated(), 400.0, 0.02);
        assert_eq!(force, Vector3::zeros());
    }

    #[test]
    fn gate_short_circuits_at_standstill() {
        let f = frame();
        let state = decompose(&velocity(0.0, 3.0), &f);
        assert_eq!(state.slip_ratio(1e-3), None);

        let gated = lateral_force(&state, &f, &FrictionConfig::default(), 400.0, 0.02);
        assert_eq!(gated, Vector3::zeros());
        assert!(gated.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn gate_skips_tiny_slip_ratio() {
        let f = frame();
        let state = decompose(&velocity(20.0, 0.1), &f);
        let config = FrictionConfig {
            slip_ratio_epsilon: 0.01,
            ..Default::default()
        };
        assert_eq!(lateral_force(&state, &f, &config, 400.0, 0.02), Vector3::zeros());

        let ungated = lateral_force(&state, &f, &FrictionConfig::ungated(), 400.0, 0.02);
        assert!(ungated.norm() > 0.0);
    }

    #[test]
    fn gate_caps_acceleration_by_lateral_speed() {
        let f = frame();
        // Large lateral slip: raw acceleration far exceeds |v_lat|.
        let state = decompose(&velocity(4.0, 6.0), &f);
        assert!(lateral_acceleration(&state, &f.right, LateralMode::MassProportional).norm() > 6.0);

        let dt = 0.02;
        let mass = 300.0;
        let force = lateral_force(&state, &f, &FrictionConfig::default(), mass, dt);
        assert_relative_eq!(force.norm(), mass * 6.0 / dt, max_relative = 1e-12);
    }

    #[test]
    fn fixed_multiplier_ignores_mass() {
        let f = frame();
        let state = decompose(&velocity(10.0, 2.0), &f);
        let config = FrictionConfig::fixed_multiplier(100.0, 1.0);
        let light = lateral_force(&state, &f, &config, 10.0, 0.02);
        let heavy = lateral_force(&state, &f, &config, 10_000.0, 0.02);
        assert_eq!(light, heavy);

        // |project(slip, v_lat)| = |v_lat| / 2 = 1.
        assert_relative_eq!(light.norm(), 100.0 * 1.0 / 0.02, max_relative = 1e-12);
        assert!(light.dot(&f.right) < 0.0);
    }

    #[test]
    fn fixed_multiplier_is_linear_in_slip() {
        let f = frame();
        let config = FrictionConfig::fixed_multiplier(100.0, 1.0);
        let force = |lateral: f64| {
            let state = decompose(&velocity(0.0, lateral), &f);
            lateral_force(&state, &f, &config, 250.0, 0.02)
        };

        let one = force(1.0);
        let two = force(2.0);
        assert_relative_eq!(one.norm(), 2500.0, max_relative = 1e-12);
        assert_relative_eq!(two.norm(), 2.0 * one.norm(), max_relative = 1e-12);
        assert_abs_diff_eq!(two.normalize(), one.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn mass_proportional_is_quadratic_in_slip() {
        let f = frame();
        let config = FrictionConfig::ungated();
        let force = |lateral: f64| {
            let state = decompose(&velocity(0.0, lateral), &f);
            lateral_force(&state, &f, &config, 250.0, 0.02)
        };
        assert_relative_eq!(force(2.0).norm(), 4.0 * force(1.0).norm(), max_relative = 1e-12);
    }

    #[test]
    fn traction_follows_torque_sign() {
        let f = frame();
        let forward = traction_direction(&f, &f.up, TractionBasis::ContactNormal, 50.0);
        assert_abs_diff_eq!(forward, f.forward.into_inner(), epsilon = 1e-12);

        let reverse = traction_direction(&f, &f.up, TractionBasis::WheelForward, -50.0);
        assert_abs_diff_eq!(reverse, -f.forward.into_inner(), epsilon = 1e-12);
    }

    #[test]
    fn traction_on_slope_follows_ground() {
        let f = frame();
        // Ground tilted about the right axis: normal leans toward forward.
        let normal = Unit::new_normalize(Vector3::new(0.0, 1.0, -1.0));
        let dir = traction_direction(&f, &normal, TractionBasis::ContactNormal, 1.0);
        assert_abs_diff_eq!(dir.dot(&normal), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dir.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn traction_limits() {
        let config = FrictionConfig::default();
        assert_relative_eq!(traction_magnitude(-300.0, 0.3, &config, 0.0, 0.0), 1000.0);

        let config = FrictionConfig {
            traction_limit: TractionLimit::Coefficient { mu: 1.0 },
            gravity: 10.0,
            ..Default::default()
        };
        assert_relative_eq!(traction_magnitude(300.0, 0.3, &config, 0.0, 50.0), 500.0);

        let config = FrictionConfig {
            traction_limit: TractionLimit::LateralBudget,
            force_cap: Some(1200.0),
            ..Default::default()
        };
        assert_relative_eq!(traction_magnitude(300.0, 0.3, &config, 900.0, 0.0), 300.0);
        assert_eq!(traction_magnitude(300.0, 0.3, &config, 5000.0, 0.0), 0.0);

        let config = FrictionConfig::fixed_multiplier(1.0, 2.0);
        assert_relative_eq!(traction_magnitude(300.0, 0.3, &config, 0.0, 0.0), 600.0);
    }

    #[test]
    fn application_point_moves_only_vertically() {
        let up = Vector3::y_axis();
        let contact = Point3::new(1.0, 0.0, -2.0);
        let com = Point3::new(0.0, 0.8, 0.0);

        assert_eq!(application_point(&contact, &com, &up, 0.0), contact);
        assert_abs_diff_eq!(
            application_point(&contact, &com, &up, 1.0),
            Point3::new(1.0, 0.8, -2.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            application_point(&contact, &com, &up, 0.25),
            Point3::new(1.0, 0.2, -2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn cap_keeps_direction() {
        let force = Vector3::new(30_000.0, 0.0, -40_000.0);
        let (capped, was_capped) = clamp_to_cap(force, Some(20_000.0));
        assert!(was_capped);
        assert_relative_eq!(capped.norm(), 20_000.0, max_relative = 1e-12);
        assert_abs_diff_eq!(capped.normalize(), force.normalize(), epsilon = 1e-12);

        let (same, was_capped) = clamp_to_cap(force, None);
        assert!(!was_capped);
        assert_eq!(same, force);
    }

    #[test]
    fn rpm_scenario() {
        let f = frame();
        let value = rpm(&velocity(3.0, 0.0), &f.forward, 0.25);
        assert_abs_diff_eq!(value, 114.5916, epsilon = 1e-3);
    }

    #[test]
    fn rpm_is_odd_and_linear() {
        let f = frame();
        let one = rpm(&velocity(1.7, 0.4), &f.forward, 0.4);
        assert_relative_eq!(rpm(&velocity(-1.7, 0.4), &f.forward, 0.4), -one);
        assert_relative_eq!(rpm(&velocity(5.1, 0.4), &f.forward, 0.4), 3.0 * one);
    }
}
