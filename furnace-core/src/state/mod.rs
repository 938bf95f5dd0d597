//! Simulation state
//!
//! The driver owns all mutable state; controllers and plant models only
//! see values handed to them each tick.

pub mod command;
pub mod disturbance;

pub use command::{Command, CommandEffect};
pub use disturbance::{DisturbanceState, DoorState, DoorTransition};

/// Snapshot of the driver-owned state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimulationState {
    /// Simulated minutes elapsed
    pub time_step: u32,
    /// Target temperature (°C)
    pub setpoint: f64,
    /// Current furnace temperature (°C)
    pub measured_temperature: f64,
    /// Integral accumulator (°C·min); `None` for proportional control
    pub integral_accumulator: Option<f64>,
}
