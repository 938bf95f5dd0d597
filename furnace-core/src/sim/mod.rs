//! Tick driver
//!
//! Runs the measure / control / plant cycle once per simulated minute and
//! keeps a bounded window of recent ticks for display.

pub mod driver;
pub mod history;

pub use driver::Simulation;
pub use history::{History, RunSummary, HISTORY_LEN};

/// Everything produced by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRecord {
    /// Simulated minute this tick represents (first tick is 1)
    pub time_step: u32,
    /// Setpoint in effect (°C)
    pub setpoint: f64,
    /// Temperature read at the start of the tick (°C)
    pub measurement: f64,
    /// Controller output (% power)
    pub power: f64,
    /// `setpoint - measurement` (°C)
    pub error: f64,
    /// Temperature after the plant update (°C)
    pub temperature: f64,
    /// Integral accumulator after the controller update (PI only)
    pub integral: Option<f64>,
    /// Door was open during this tick
    pub door_open: bool,
}
