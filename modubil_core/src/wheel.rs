// modubil_core/src/wheel.rs

use serde::Deserialize;

use crate::error::ConfigError;

/// Static wheel geometry, fixed once the vehicle is configured.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Wheel {
    /// Meters.
    #[serde(default = "default_radius")]
    radius: f64,
    /// Meters.
    #[serde(default = "default_width")]
    width: f64,
}

fn default_radius() -> f64 {
    0.25
}

fn default_width() -> f64 {
    0.2
}

impl Default for Wheel {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            width: default_width(),
        }
    }
}

impl Wheel {
    pub fn new(radius: f64, width: f64) -> Result<Self, ConfigError> {
        let wheel = Self { radius, width };
        wheel.validate()?;
        Ok(wheel)
    }

    /// Checks a deserialized wheel. `Wheel::new` already calls this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !(self.width > 0.0) {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}
