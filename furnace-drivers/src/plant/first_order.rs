//! First-order furnace thermal model
//!
//! Per simulated minute:
//!
//! ```text
//! T' = T - drop + (P / 100) * max_heating_rate - k * (T - ambient) - door_loss
//! ```
//!
//! `drop` is the one-shot door drop (only on the first step after the door
//! opens), `door_loss` the continuous loss while it stays open. The cooling
//! term is computed from the measured temperature `T`, so the one-shot drop
//! lowers the result by exactly `door_initial_drop`.
//!
//! Cooling is linear and symmetric: below ambient it becomes a small
//! heating term. Temperature is not bounded in either direction.

use furnace_core::config::PlantParameters;
use furnace_core::state::DisturbanceState;
use furnace_core::traits::PlantModel;
use furnace_core::SimError;

/// Linear Newton-cooling furnace with door disturbance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirstOrderPlant {
    params: PlantParameters,
}

impl FirstOrderPlant {
    /// Create a model from validated parameters
    pub fn new(params: PlantParameters) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Model parameters
    pub fn params(&self) -> &PlantParameters {
        &self.params
    }

    /// Heat delivered at `power` % (°C/min)
    pub fn heating(&self, power: f64) -> f64 {
        (power / 100.0) * self.params.max_heating_rate
    }

    /// Loss to ambient at `temperature` (°C/min, negative below ambient)
    pub fn cooling(&self, temperature: f64) -> f64 {
        self.params.loss_coefficient * (temperature - self.params.ambient_temperature)
    }

    /// Temperature where heating at `power` balances ambient loss
    ///
    /// `None` with a zero loss coefficient (no equilibrium while heating).
    pub fn equilibrium(&self, power: f64) -> Option<f64> {
        if self.params.loss_coefficient > 0.0 {
            Some(self.params.ambient_temperature + self.heating(power) / self.params.loss_coefficient)
        } else {
            None
        }
    }
}

impl Default for FirstOrderPlant {
    fn default() -> Self {
        Self {
            params: PlantParameters::default(),
        }
    }
}

impl PlantModel for FirstOrderPlant {
    fn step(&self, temperature: f64, power: f64, disturbance: &mut DisturbanceState) -> f64 {
        let mut next = temperature;

        // Instantaneous loss at the moment the door opens
        if disturbance.take_initial_drop() {
            next -= self.params.door_initial_drop;
        }

        let heating = self.heating(power);
        let cooling = self.cooling(temperature);
        let door_loss = if disturbance.door_open() {
            self.params.door_loss_per_minute
        } else {
            0.0
        };

        next + heating - cooling - door_loss
    }
}
