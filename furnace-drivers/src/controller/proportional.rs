//! Proportional controller
//!
//! Output is the error scaled by Kp and saturated to the power range. No
//! internal state, so `reset` is a no-op.

use furnace_core::config::{ControlMode, ControllerParameters, OUTPUT_MAX, OUTPUT_MIN};
use furnace_core::traits::Controller;
use furnace_core::SimError;

/// P-only controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProportionalController {
    kp: f64,
}

impl ProportionalController {
    /// Create a controller with gain `kp` (% power per °C)
    pub fn new(kp: f64) -> Result<Self, SimError> {
        ControllerParameters::proportional(kp).validate()?;
        Ok(Self { kp })
    }

    /// Proportional gain
    pub fn kp(&self) -> f64 {
        self.kp
    }
}

impl Controller for ProportionalController {
    fn compute(&mut self, error: f64) -> f64 {
        (self.kp * error).clamp(OUTPUT_MIN, OUTPUT_MAX)
    }

    fn reset(&mut self) {}

    fn mode(&self) -> ControlMode {
        ControlMode::Proportional
    }
}
