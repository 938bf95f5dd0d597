//! Controller implementations

pub mod pi;
pub mod proportional;

pub use pi::{PiCoefficients, PiController};
pub use proportional::ProportionalController;

use furnace_core::config::{ControlMode, ControllerParameters};
use furnace_core::traits::Controller;
use furnace_core::SimError;

/// Either controller variant, selected by configuration
///
/// Lets the driver and host runtime hold one concrete type regardless of
/// which variant is active.
#[derive(Debug, Clone, PartialEq)]
pub enum FurnaceController {
    Proportional(ProportionalController),
    ProportionalIntegral(PiController),
}

impl FurnaceController {
    /// Build the variant named by `params.mode()`
    pub fn from_parameters(params: &ControllerParameters) -> Result<Self, SimError> {
        params.validate()?;
        match params.mode() {
            ControlMode::Proportional => {
                ProportionalController::new(params.kp).map(FurnaceController::Proportional)
            }
            ControlMode::ProportionalIntegral => {
                PiController::from_parameters(params).map(FurnaceController::ProportionalIntegral)
            }
        }
    }
}

impl Controller for FurnaceController {
    fn compute(&mut self, error: f64) -> f64 {
        match self {
            FurnaceController::Proportional(c) => c.compute(error),
            FurnaceController::ProportionalIntegral(c) => c.compute(error),
        }
    }

    fn reset(&mut self) {
        match self {
            FurnaceController::Proportional(c) => c.reset(),
            FurnaceController::ProportionalIntegral(c) => c.reset(),
        }
    }

    fn integral(&self) -> Option<f64> {
        match self {
            FurnaceController::Proportional(c) => c.integral(),
            FurnaceController::ProportionalIntegral(c) => c.integral(),
        }
    }

    fn mode(&self) -> ControlMode {
        match self {
            FurnaceController::Proportional(c) => c.mode(),
            FurnaceController::ProportionalIntegral(c) => c.mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furnace_core::error::ConfigField;

    #[test]
    fn test_variant_from_ki() {
        let controller = FurnaceController::from_parameters(&ControllerParameters {
            kp: 0.9,
            ki: 0.0,
            mode: None,
        })
        .unwrap();
        assert_eq!(controller.mode(), ControlMode::Proportional);
        assert_eq!(controller.integral(), None);

        let controller =
            FurnaceController::from_parameters(&ControllerParameters::default()).unwrap();
        assert_eq!(controller.mode(), ControlMode::ProportionalIntegral);
        assert_eq!(controller.integral(), Some(0.0));
    }

    #[test]
    fn test_forced_proportional() {
        let params = ControllerParameters {
            mode: Some(ControlMode::Proportional),
            ..Default::default()
        };
        let mut controller = FurnaceController::from_parameters(&params).unwrap();
        assert_eq!(controller.mode(), ControlMode::Proportional);
        // Ki ignored: 0.9 * 10
        assert_eq!(controller.compute(10.0), 9.0);
    }

    #[test]
    fn test_variants_agree_on_first_call_when_unsaturated() {
        let mut p = FurnaceController::from_parameters(&ControllerParameters::proportional(0.9))
            .unwrap();
        let mut pi = FurnaceController::from_parameters(
            &ControllerParameters::proportional_integral(0.9, 0.2),
        )
        .unwrap();

        assert_eq!(p.compute(10.0), 9.0);
        assert_eq!(pi.compute(10.0), 0.9 * 10.0 + 0.2 * 10.0);

        pi.reset();
        assert_eq!(pi.integral(), Some(0.0));
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            FurnaceController::from_parameters(&ControllerParameters::proportional(-1.0)),
            Err(SimError::InvalidConfiguration(ConfigField::Kp))
        );
    }
}
