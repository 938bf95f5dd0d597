//! Telemetry output

mod console;

pub use console::{format_record, ConsoleSink};
