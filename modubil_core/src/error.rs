// modubil_core/src/error.rs

use thiserror::Error;

/// A collaborator a wheel could not resolve when it was wired up.
/// A wheel that reports one of these is inert for the rest of its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MissingDependency {
    #[error("no rigid body to apply forces to")]
    RigidBody,
    #[error("no contact sensor")]
    ContactSensor,
    #[error("no wheel geometry")]
    WheelGeometry,
}

/// Invalid tuning or geometry values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("wheel radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("wheel width must be positive, got {0}")]
    InvalidWidth(f64),
    #[error("apply_forces_offset must be within [0, 1], got {0}")]
    OffsetOutOfRange(f64),
    #[error("force cap must be positive, got {0}")]
    InvalidForceCap(f64),
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("fixed time step must be positive, got {0}")]
    InvalidTimeStep(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("missing dependency: {0}")]
    Missing(#[from] MissingDependency),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
