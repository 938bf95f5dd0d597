//! Proportional-integral controller
//!
//! Implements PI control with a clamped integral accumulator (anti-windup)
//! and a saturated output. One call to `compute` is one simulated minute, so
//! the accumulator is a rectangular-rule integral of the error over time.

use furnace_core::config::{ControlMode, ControllerParameters, OUTPUT_MAX, OUTPUT_MIN};
use furnace_core::error::ConfigField;
use furnace_core::traits::Controller;
use furnace_core::SimError;

/// PI coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiCoefficients {
    /// Proportional gain (Kp)
    pub kp: f64,
    /// Integral gain (Ki)
    pub ki: f64,
}

/// PI controller internal state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PiState {
    /// Accumulated error (°C·min)
    integral: f64,
}

/// PI controller with anti-windup
///
/// While the output is saturated the error keeps accumulating, so without a
/// bound the integral would grow without limit during the initial ramp and
/// cause a large overshoot once the error changes sign. The accumulator is
/// clamped to `±OUTPUT_MAX / Ki`: enough for the integral term alone to
/// command anywhere in the output range, and no more.
#[derive(Debug, Clone, PartialEq)]
pub struct PiController {
    coefficients: PiCoefficients,
    /// Anti-windup bound (°C·min)
    integral_limit: f64,
    state: PiState,
}

impl PiController {
    /// Create a new PI controller
    ///
    /// Requires `Kp > 0` and `Ki > 0`; use [`super::ProportionalController`]
    /// for `Ki == 0`.
    pub fn new(kp: f64, ki: f64) -> Result<Self, SimError> {
        Self::from_parameters(&ControllerParameters::proportional_integral(kp, ki))
    }

    /// Create from validated parameters
    pub fn from_parameters(params: &ControllerParameters) -> Result<Self, SimError> {
        params.validate()?;
        let integral_limit = params
            .integral_limit()
            .ok_or(SimError::InvalidConfiguration(ConfigField::Ki))?;

        Ok(Self {
            coefficients: PiCoefficients {
                kp: params.kp,
                ki: params.ki,
            },
            integral_limit,
            state: PiState::default(),
        })
    }

    /// Get current coefficients
    pub fn coefficients(&self) -> &PiCoefficients {
        &self.coefficients
    }

    /// Anti-windup bound (°C·min)
    pub fn integral_limit(&self) -> f64 {
        self.integral_limit
    }
}

impl Controller for PiController {
    fn compute(&mut self, error: f64) -> f64 {
        let coeffs = &self.coefficients;

        // Proportional term: P = Kp * error
        let p_term = coeffs.kp * error;

        // Integral term with anti-windup
        self.state.integral =
            (self.state.integral + error).clamp(-self.integral_limit, self.integral_limit);
        let i_term = coeffs.ki * self.state.integral;

        (p_term + i_term).clamp(OUTPUT_MIN, OUTPUT_MAX)
    }

    fn reset(&mut self) {
        self.state = PiState::default();
    }

    fn integral(&self) -> Option<f64> {
        Some(self.state.integral)
    }

    fn mode(&self) -> ControlMode {
        ControlMode::ProportionalIntegral
    }
}
