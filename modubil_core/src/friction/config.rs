// modubil_core/src/friction/config.rs

use serde::Deserialize;

use crate::error::ConfigError;

/// How the lateral (cornering) force magnitude is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")]
pub enum LateralMode {
    /// Scaled by the wheel's current supported mass.
    #[default]
    MassProportional,
    /// Linear in the slip magnitude and scaled by a constant instead of the
    /// supported mass.
    FixedMultiplier { coefficient: f64 },
}

/// Upper bound on the traction force derived from motor torque.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")]
pub enum TractionLimit {
    /// Traction equals `|torque| / radius`; no load limit.
    #[default]
    TorqueOnly,
    /// Traction may use whatever is left of `force_cap` after the lateral force.
    /// Behaves like `TorqueOnly` when no cap is configured.
    LateralBudget,
    /// Load-limited: at most `mu × supported_mass × gravity`.
    Coefficient { mu: f64 },
    /// At most `|torque| × ratio`.
    DrivetrainRatio { ratio: f64 },
}

/// Which axis the traction force points along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum TractionBasis {
    /// `normal × right`, so traction follows the ground on slopes.
    #[default]
    ContactNormal,
    /// The wheel's own forward axis.
    WheelForward,
}

/// # FrictionConfig
/// Tuning for one `WheelFrictionModel`. The defaults are the reference
/// policy: mass-proportional lateral force with slip-ratio gating.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(default)]
pub struct FrictionConfig {
    /// Height of the force application point between the contact (0) and the
    /// center of mass (1). Higher values reduce body roll.
    pub apply_forces_offset: f64,

    /// Apply the force through the center of mass, producing no torque.
    pub apply_at_center_of_mass: bool,

    /// Hard ceiling on the combined force magnitude in newtons.
    pub force_cap: Option<f64>,

    pub use_slip_ratio_gate: bool,

    /// Lateral force is skipped while `|v_lateral| / |v_forward|` is below this.
    pub slip_ratio_epsilon: f64,

    /// Forward speeds below this (m/s) short-circuit the gate to zero lateral force.
    pub min_forward_speed: f64,

    pub lateral_mode: LateralMode,

    pub traction_limit: TractionLimit,

    pub traction_basis: TractionBasis,

    /// m/s², used by `TractionLimit::Coefficient`.
    pub gravity: f64,

    /// Trace supported mass and lateral acceleration for this wheel.
    pub debug_log: bool,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            apply_forces_offset: 0.0,
            apply_at_center_of_mass: false,
            force_cap: Some(20_000.0),
            use_slip_ratio_gate: true,
            slip_ratio_epsilon: 0.01,
            min_forward_speed: 1e-3,
            lateral_mode: LateralMode::MassProportional,
            traction_limit: TractionLimit::TorqueOnly,
            traction_basis: TractionBasis::ContactNormal,
            gravity: 9.81,
            debug_log: false,
        }
    }
}

impl FrictionConfig {
    /// The first successive design: no gate, plain mass-proportional response.
    pub fn ungated() -> Self {
        Self {
            use_slip_ratio_gate: false,
            ..Self::default()
        }
    }

    /// The simplified tuning surface that ignores the mass distribution.
    pub fn fixed_multiplier(coefficient: f64, drivetrain_ratio: f64) -> Self {
        Self {
            use_slip_ratio_gate: false,
            lateral_mode: LateralMode::FixedMultiplier { coefficient },
            traction_limit: TractionLimit::DrivetrainRatio {
                ratio: drivetrain_ratio,
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.apply_forces_offset) {
            return Err(ConfigError::OffsetOutOfRange(self.apply_forces_offset));
        }
        if let Some(cap) = self.force_cap {
            if !(cap > 0.0) {
                return Err(ConfigError::InvalidForceCap(cap));
            }
        }

        non_negative("slip_ratio_epsilon", self.slip_ratio_epsilon)?;
        non_negative("min_forward_speed", self.min_forward_speed)?;
        non_negative("gravity", self.gravity)?;

        if let LateralMode::FixedMultiplier { coefficient } = self.lateral_mode {
            non_negative("lateral coefficient", coefficient)?;
        }
        match self.traction_limit {
            TractionLimit::Coefficient { mu } => non_negative("mu", mu)?,
            TractionLimit::DrivetrainRatio { ratio } => non_negative("drivetrain ratio", ratio)?,
            TractionLimit::TorqueOnly | TractionLimit::LateralBudget => {}
        }

        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_gated_mass_proportional() {
        let config = FrictionConfig::default();
        assert!(config.use_slip_ratio_gate);
        assert_eq!(config.lateral_mode, LateralMode::MassProportional);
        assert_eq!(config.force_cap, Some(20_000.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = FrictionConfig {
            apply_forces_offset: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::OffsetOutOfRange(1.5)));

        let config = FrictionConfig {
            force_cap: Some(0.0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidForceCap(0.0)));

        let config = FrictionConfig {
            traction_limit: TractionLimit::Coefficient { mu: -0.1 },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { name: "mu", .. })
        ));
    }

    #[test]
    fn presets_validate() {
        assert!(FrictionConfig::ungated().validate().is_ok());
        assert!(FrictionConfig::fixed_multiplier(800.0, 3.5).validate().is_ok());
    }
}
