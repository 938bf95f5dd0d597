//! Thermal plant trait

use crate::state::DisturbanceState;

/// Advances the furnace temperature by one simulated minute
pub trait PlantModel {
    /// Compute the next temperature
    ///
    /// - `temperature`: current temperature (°C)
    /// - `power`: applied power (% of full power, 0..=100)
    /// - `disturbance`: door state; the one-shot drop is consumed here
    fn step(&self, temperature: f64, power: f64, disturbance: &mut DisturbanceState) -> f64;
}
