use crate::{error::Error, Result};

pub const DEFAULT_DENSITY: f32 = 1.0;

/// Display density: the number of physical pixels per density-independent unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(f32);

impl Density {
    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidDensity(value));
        }
        Ok(Density(value))
    }

    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.0
    }

    pub fn px_to_dp(&self, px: f32) -> f32 {
        px / self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Density(DEFAULT_DENSITY)
    }
}
