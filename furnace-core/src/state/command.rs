//! External inputs applied at tick boundaries

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::disturbance::DoorTransition;

/// Commands from the operator (slider, checkbox, script)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    /// New target temperature (°C)
    SetSetpoint(f64),
    /// Open (`true`) or close (`false`) the furnace door
    SetDoor(bool),
}

/// What applying a command changed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandEffect {
    /// Setpoint written
    Setpoint {
        /// Previous setpoint (°C)
        from: f64,
        /// New setpoint (°C)
        to: f64,
        /// Controller accumulator was cleared
        integral_reset: bool,
    },
    /// Door command processed
    Door(DoorTransition),
}
