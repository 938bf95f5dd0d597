//! Controller trait

use crate::config::ControlMode;

/// Maps a temperature error to a bounded power command
///
/// Implementations keep whatever internal state they need (the PI
/// accumulator) across calls. One call corresponds to one simulated minute.
pub trait Controller {
    /// Compute the power command (% of full power, always within 0..=100)
    ///
    /// `error` is `setpoint - measurement` in °C.
    fn compute(&mut self, error: f64) -> f64;

    /// Clear any accumulated state
    ///
    /// After a reset the controller behaves exactly like a freshly
    /// constructed one with the same gains.
    fn reset(&mut self);

    /// Current integral accumulator (°C·min), if the variant has one
    fn integral(&self) -> Option<f64> {
        None
    }

    /// Which variant this is
    fn mode(&self) -> ControlMode;
}
