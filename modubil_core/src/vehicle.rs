// modubil_core/src/vehicle.rs

//! The fixed-step driver for one vehicle: mass distribution first, then
//! every wheel's friction against the shared rigid body.

use crate::abstractions::{ContactSensor, PhysicsBody, PoweredWheel, SuspensionLoad, WheelMount};
use crate::error::MissingDependency;
use crate::friction::{TickOutcome, WheelFrictionModel};
use crate::mass::{MassAllocation, MassDistributor};
use crate::types::WheelId;

/// One wheel with its collaborators, resolved once when the vehicle is assembled.
#[derive(Debug)]
pub struct WheelUnit {
    id: WheelId,
    model: WheelFrictionModel,
    mount: Box<dyn WheelMount>,
    sensor: Option<Box<dyn ContactSensor>>,
}

impl WheelUnit {
    /// A missing sensor makes the wheel inert immediately.
    pub fn new(
        id: WheelId,
        mut model: WheelFrictionModel,
        mount: Box<dyn WheelMount>,
        sensor: Option<Box<dyn ContactSensor>>,
    ) -> Self {
        if sensor.is_none() {
            model.disable(MissingDependency::ContactSensor);
        }
        Self {
            id,
            model,
            mount,
            sensor,
        }
    }

    pub fn id(&self) -> WheelId {
        self.id
    }

    pub fn model(&self) -> &WheelFrictionModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut WheelFrictionModel {
        &mut self.model
    }

    fn tick(&mut self, body: &mut dyn PhysicsBody, dt: f64) -> TickOutcome {
        let frame = self.mount.frame();
        match self.sensor.as_deref_mut() {
            Some(sensor) => self.model.tick(&frame, sensor, body, dt),
            None => TickOutcome::Inert(MissingDependency::ContactSensor),
        }
    }
}

/// What one `Vehicle::step` produced.
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub allocation: MassAllocation,
    pub outcomes: Vec<(WheelId, TickOutcome)>,
}

impl StepReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, TickOutcome::Applied(_)))
            .count()
    }

    pub fn outcome(&self, wheel: WheelId) -> Option<&TickOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == wheel)
            .map(|(_, outcome)| outcome)
    }
}

#[derive(Debug, Default)]
pub struct Vehicle {
    distributor: MassDistributor,
    wheels: Vec<WheelUnit>,
}

impl Vehicle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wheel and registers its suspension with the mass distributor.
    pub fn add_wheel(&mut self, unit: WheelUnit, suspension: Option<Box<dyn SuspensionLoad>>) {
        self.distributor.attach(unit.id(), suspension);
        self.wheels.push(unit);
    }

    pub fn wheels(&self) -> &[WheelUnit] {
        &self.wheels
    }

    pub fn wheel(&self, id: WheelId) -> Option<&WheelUnit> {
        self.wheels.iter().find(|unit| unit.id == id)
    }

    pub fn wheel_mut(&mut self, id: WheelId) -> Option<&mut WheelUnit> {
        self.wheels.iter_mut().find(|unit| unit.id == id)
    }

    /// Drivetrain entry point. Returns `false` for an unknown wheel.
    pub fn apply_torque(&mut self, id: WheelId, torque: f64) -> bool {
        match self.wheel_mut(id) {
            Some(unit) => {
                unit.model.apply_torque(torque);
                true
            }
            None => false,
        }
    }

    /// Runs one fixed tick against `body`. Wheels are independent: an inert or
    /// degenerate wheel never stops the others.
    pub fn step(&mut self, body: &mut dyn PhysicsBody, dt: f64) -> StepReport {
        let allocation = self.distributor.tick(body.mass());

        for unit in &mut self.wheels {
            if let Some(mass) = allocation.get(unit.id) {
                unit.model.set_supported_mass(mass);
            }
        }

        let mut outcomes = Vec::with_capacity(self.wheels.len());
        for unit in &mut self.wheels {
            outcomes.push((unit.id, unit.tick(body, dt)));
        }

        StepReport {
            allocation,
            outcomes,
        }
    }
}
