//! Console telemetry sink
//!
//! Logs one line per tick through the `log` facade.

use log::{debug, info};

use furnace_core::sim::TickRecord;
use furnace_core::traits::TelemetrySink;

/// Logs every tick at info level
#[derive(Debug, Default)]
pub struct ConsoleSink {
    /// Door state seen on the previous tick
    door_open: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for ConsoleSink {
    fn publish(&mut self, record: &TickRecord) {
        if record.door_open && !self.door_open {
            debug!(
                "t={} min: door open, heat loss active",
                record.time_step
            );
        }
        self.door_open = record.door_open;

        info!("{}", format_record(record));
    }
}

/// Render a tick as a single console line
pub fn format_record(record: &TickRecord) -> String {
    let integral = match record.integral {
        Some(integral) => format!(" | I {integral:7.1}"),
        None => String::new(),
    };
    let door = if record.door_open { " | door open" } else { "" };

    format!(
        "t={:4} min | SP {:6.1} °C | T {:7.2} °C | e {:7.2} °C | P {:6.2} %{} | -> {:7.2} °C{}",
        record.time_step,
        record.setpoint,
        record.measurement,
        record.error,
        record.power,
        integral,
        record.temperature,
        door,
    )
}
