// modubil_core/src/mass.rs

//! Apportions the vehicle's mass across its wheels in proportion to the
//! instantaneous suspension load each wheel carries.

use tracing::warn;

use crate::abstractions::SuspensionLoad;
use crate::types::WheelId;

/// Per-wheel supported mass for one tick, in the order the wheels were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassAllocation {
    shares: Vec<(WheelId, f64)>,
}

impl MassAllocation {
    /// Supported mass for `wheel`, or `None` if it was not part of the allocation.
    pub fn get(&self, wheel: WheelId) -> Option<f64> {
        self.shares
            .iter()
            .find(|(id, _)| *id == wheel)
            .map(|(_, mass)| *mass)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WheelId, f64)> + '_ {
        self.shares.iter().copied()
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|(_, mass)| mass).sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Splits `vehicle_mass` across wheels proportional to their suspension loads.
///
/// Negative or non-finite loads count as zero. If the loads sum to zero (all
/// wheels airborne) every wheel gets zero mass.
pub fn distribute(loads: &[(WheelId, f64)], vehicle_mass: f64) -> MassAllocation {
    let sanitized = |load: f64| if load.is_finite() { load.max(0.0) } else { 0.0 };
    let total: f64 = loads.iter().map(|(_, load)| sanitized(*load)).sum();

    let shares = loads
        .iter()
        .map(|(id, load)| {
            let share = if total > 0.0 {
                sanitized(*load) / total
            } else {
                0.0
            };
            (*id, vehicle_mass * share)
        })
        .collect();

    MassAllocation { shares }
}

/// A wheel registered with the distributor at attach time.
#[derive(Debug)]
struct DistributedWheel {
    id: WheelId,
    suspension: Option<Box<dyn SuspensionLoad>>,
}

/// Holds the wheel → suspension wiring resolved once at startup and produces
/// a fresh `MassAllocation` every fixed tick.
#[derive(Debug, Default)]
pub struct MassDistributor {
    wheels: Vec<DistributedWheel>,
}

impl MassDistributor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wheel. A wheel without a resolvable suspension is kept so it
    /// still receives an explicit zero share, and a warning is logged once here.
    pub fn attach(&mut self, id: WheelId, suspension: Option<Box<dyn SuspensionLoad>>) {
        if suspension.is_none() {
            warn!(
                "Wheel {:?} has no suspension; it will be excluded from mass distribution.",
                id
            );
        }
        self.wheels.push(DistributedWheel { id, suspension });
    }

    pub fn wheel_count(&self) -> usize {
        self.wheels.len()
    }

    /// Reads every suspension and splits `vehicle_mass` across the wheels.
    pub fn tick(&self, vehicle_mass: f64) -> MassAllocation {
        let loads: Vec<(WheelId, f64)> = self
            .wheels
            .iter()
            .map(|wheel| {
                let load = wheel
                    .suspension
                    .as_ref()
                    .map_or(0.0, |suspension| suspension.force_magnitude());
                (wheel.id, load)
            })
            .collect();

        distribute(&loads, vehicle_mass)
    }
}
