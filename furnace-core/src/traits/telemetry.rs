//! Telemetry sink trait for the display collaborator

use crate::sim::TickRecord;

/// Receives one record per simulation tick
///
/// Charts, console output and test recorders all sit behind this trait.
pub trait TelemetrySink {
    /// Publish a completed tick
    fn publish(&mut self, record: &TickRecord);
}

/// Discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn publish(&mut self, _record: &TickRecord) {}
}
