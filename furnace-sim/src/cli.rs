//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

/// Electric furnace temperature regulation simulator
#[derive(Debug, Parser)]
#[command(name = "furnace-sim", version, about)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop after this many simulated minutes (default: run until `quit`)
    #[arg(short, long)]
    pub ticks: Option<u32>,

    /// Wall-clock milliseconds per simulated minute
    #[arg(long)]
    pub tick_period_ms: Option<u32>,

    /// Initial setpoint in °C
    #[arg(short, long)]
    pub setpoint: Option<f64>,

    /// Proportional-only control, ignoring Ki
    #[arg(long)]
    pub proportional: bool,

    /// Do not read commands from stdin
    #[arg(long)]
    pub no_stdin: bool,
}

impl Args {
    /// Values that take precedence over the configuration file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            tick_period_ms: self.tick_period_ms,
            setpoint: self.setpoint,
            proportional: self.proportional,
        }
    }
}
