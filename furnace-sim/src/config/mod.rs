//! Configuration handling
//!
//! The simulation is configured from an optional TOML file with
//! command-line overrides on top. Everything is validated before the
//! simulation is built.

mod loader;
mod schedule;

pub use loader::{load_config, parse_config, Overrides, RunConfig};
pub use schedule::{Schedule, ScheduledCommand};
