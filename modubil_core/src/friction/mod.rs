// modubil_core/src/friction/mod.rs

//! Per-wheel friction: turns contact kinematics, supported mass and motor
//! torque into one force pushed into the vehicle's rigid body each tick.

use nalgebra::{Point3, Vector3};
use tracing::{debug, trace, warn};

use crate::abstractions::{ContactSensor, PhysicsBody, PoweredWheel, RpmProvider};
use crate::error::{MissingDependency, ModelError};
use crate::math::is_finite;
use crate::types::{ContactSample, WheelFrame};
use crate::wheel::Wheel;

pub mod config;
pub mod forces;

use config::FrictionConfig;
use forces::SlipState;

/// Whether a wheel computes forces at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelStatus {
    Active,
    /// A dependency could not be resolved at startup. Permanent.
    Inert(MissingDependency),
}

/// Where a force went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceTarget {
    CenterOfMass,
    Point(Point3<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedForce {
    /// The force handed to the rigid body, after the cap.
    pub force: Vector3<f64>,
    pub target: ForceTarget,
    /// Cornering component before the cap.
    pub lateral: Vector3<f64>,
    /// Traction component before the cap.
    pub traction: Vector3<f64>,
    /// The combined force exceeded `force_cap` and was rescaled.
    pub capped: bool,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Applied(AppliedForce),
    /// No contact this tick; RPM was still updated.
    NotGrounded,
    Inert(MissingDependency),
    /// The math produced a non-finite value, so nothing was applied.
    Degenerate,
}

impl TickOutcome {
    pub fn applied(&self) -> Option<&AppliedForce> {
        match self {
            TickOutcome::Applied(applied) => Some(applied),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WheelFrictionModel {
    name: String,
    config: FrictionConfig,
    wheel: Option<Wheel>,
    status: WheelStatus,

    motor_torque: f64,
    supported_mass: f64,
    rpm: f64,

    slip: SlipState,
    last_outcome: Option<TickOutcome>,
}

impl WheelFrictionModel {
    /// Creates a model. A `None` wheel makes the model inert right away
    /// rather than failing; bad tuning values are an error.
    pub fn new(
        name: impl Into<String>,
        config: FrictionConfig,
        wheel: Option<Wheel>,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        if let Some(wheel) = &wheel {
            wheel.validate()?;
        }

        let mut model = Self {
            name: name.into(),
            config,
            wheel,
            status: WheelStatus::Active,
            motor_torque: 0.0,
            supported_mass: 0.0,
            rpm: 0.0,
            slip: SlipState::default(),
            last_outcome: None,
        };
        if model.wheel.is_none() {
            model.disable(MissingDependency::WheelGeometry);
        }
        Ok(model)
    }

    /// Marks the wheel permanently inert. Only the first call logs.
    pub fn disable(&mut self, missing: MissingDependency) {
        if self.status == WheelStatus::Active {
            warn!(
                "Wheel '{}' is missing a dependency ({}); it will not apply friction.",
                self.name, missing
            );
            self.status = WheelStatus::Inert(missing);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &FrictionConfig {
        &self.config
    }

    pub fn wheel(&self) -> Option<&Wheel> {
        self.wheel.as_ref()
    }

    pub fn status(&self) -> WheelStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == WheelStatus::Active
    }

    pub fn set_supported_mass(&mut self, mass: f64) {
        if self.config.debug_log {
            trace!("{} has supported mass of {}", self.name, mass);
        }
        self.supported_mass = if mass.is_finite() { mass.max(0.0) } else { 0.0 };
    }

    pub fn supported_mass(&self) -> f64 {
        self.supported_mass
    }

    pub fn motor_torque(&self) -> f64 {
        self.motor_torque
    }

    /// Velocity decomposition from the most recent tick.
    pub fn slip_state(&self) -> &SlipState {
        &self.slip
    }

    pub fn last_outcome(&self) -> Option<&TickOutcome> {
        self.last_outcome.as_ref()
    }

    /// Runs one fixed tick: queries the sensor once, applies friction to `body`
    /// when grounded, and refreshes the RPM from the point velocity.
    pub fn tick(
        &mut self,
        frame: &WheelFrame,
        sensor: &mut dyn ContactSensor,
        body: &mut dyn PhysicsBody,
        dt: f64,
    ) -> TickOutcome {
        let wheel = match (self.status, self.wheel) {
            (WheelStatus::Inert(missing), _) => return self.finish(TickOutcome::Inert(missing)),
            (WheelStatus::Active, None) => {
                self.disable(MissingDependency::WheelGeometry);
                return self.finish(TickOutcome::Inert(MissingDependency::WheelGeometry));
            }
            (WheelStatus::Active, Some(wheel)) => wheel,
        };

        let point_velocity = body.point_velocity(&frame.position);
        if !is_finite(&point_velocity) {
            return self.finish(TickOutcome::Degenerate);
        }
        self.slip = forces::decompose(&point_velocity, frame);

        let outcome = match sensor.try_get_contact() {
            Some(contact) => self.apply_friction(&wheel, frame, &contact, body, dt),
            None => TickOutcome::NotGrounded,
        };

        self.rpm = forces::rpm(&point_velocity, &frame.forward, wheel.radius());
        self.finish(outcome)
    }

    fn apply_friction(
        &self,
        wheel: &Wheel,
        frame: &WheelFrame,
        contact: &ContactSample,
        body: &mut dyn PhysicsBody,
        dt: f64,
    ) -> TickOutcome {
        if !(dt > 0.0) {
            return TickOutcome::Degenerate;
        }
        let config = &self.config;

        if config.debug_log {
            trace!(
                "Lat A for {}: {:?}",
                self.name,
                forces::lateral_acceleration(&self.slip, &frame.right, config.lateral_mode)
            );
        }
        let lateral = forces::lateral_force(&self.slip, frame, config, self.supported_mass, dt);

        let traction_magnitude = forces::traction_magnitude(
            self.motor_torque,
            wheel.radius(),
            config,
            lateral.norm(),
            self.supported_mass,
        );
        let traction = forces::traction_direction(
            frame,
            &contact.normal,
            config.traction_basis,
            self.motor_torque,
        ) * traction_magnitude;

        let combined = lateral + traction;
        let (force, capped) = forces::clamp_to_cap(combined, config.force_cap);
        if capped {
            debug!(
                "{} wanted to apply a force of size {:.1} - scaling down to {:.1}",
                self.name,
                combined.norm(),
                force.norm()
            );
        }
        if !is_finite(&force) {
            return TickOutcome::Degenerate;
        }

        let target = if config.apply_at_center_of_mass {
            body.add_force(&force);
            ForceTarget::CenterOfMass
        } else {
            let point = forces::application_point(
                &contact.point,
                &body.world_center_of_mass(),
                &frame.up,
                config.apply_forces_offset,
            );
            if !is_finite(&point.coords) {
                return TickOutcome::Degenerate;
            }
            body.add_force_at_position(&force, &point);
            ForceTarget::Point(point)
        };

        TickOutcome::Applied(AppliedForce {
            force,
            target,
            lateral,
            traction,
            capped,
        })
    }

    fn finish(&mut self, outcome: TickOutcome) -> TickOutcome {
        self.last_outcome = Some(outcome);
        outcome
    }
}

impl PoweredWheel for WheelFrictionModel {
    fn apply_torque(&mut self, torque: f64) {
        self.motor_torque = if torque.is_finite() { torque } else { 0.0 };
    }
}

impl RpmProvider for WheelFrictionModel {
    fn rpm(&self) -> f64 {
        self.rpm
    }
}
