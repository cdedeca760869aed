// modubil_core/src/prelude.rs

// --- Core Abstractions (The contracts every engine adapter implements) ---
pub use crate::abstractions::{
    ContactSensor, PhysicsBody, PoweredWheel, RpmProvider, SuspensionLoad, WheelMount,
};

// --- Core Data Structures ---
pub use crate::types::{BodyRef, BodyState, ContactSample, SurfaceRef, WheelFrame, WheelId};
pub use crate::wheel::Wheel;

// --- Errors ---
pub use crate::error::{ConfigError, MissingDependency, ModelError};

// --- Algorithms ---
pub use crate::body::{center_of_mass_from_marker, ForceAccumulator};
pub use crate::friction::config::{FrictionConfig, LateralMode, TractionBasis, TractionLimit};
pub use crate::friction::{AppliedForce, ForceTarget, TickOutcome, WheelFrictionModel, WheelStatus};
pub use crate::mass::{distribute, MassAllocation, MassDistributor};
pub use crate::vehicle::{StepReport, Vehicle, WheelUnit};
