//! Configuration loading
//!
//! Parses the TOML file, applies command-line overrides and validates the
//! result. A missing file means defaults throughout.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Deserialize;

use furnace_core::config::{ControlMode, ControllerParameters, PlantParameters, SimulationConfig};

use super::schedule::{Schedule, ScheduledCommand};

/// On-disk layout
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    tick_period_ms: Option<u32>,
    initial_setpoint: Option<f64>,
    /// Defaults to the plant's ambient temperature
    initial_temperature: Option<f64>,
    reset_integral_on_setpoint: Option<bool>,
    at_target_band: Option<f64>,
    controller: ControllerParameters,
    plant: PlantParameters,
    schedule: Vec<ScheduledCommand>,
}

impl FileConfig {
    fn into_parts(self) -> (SimulationConfig, Vec<ScheduledCommand>) {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            controller: self.controller,
            plant: self.plant,
            initial_setpoint: self.initial_setpoint.unwrap_or(defaults.initial_setpoint),
            initial_temperature: self
                .initial_temperature
                .unwrap_or(self.plant.ambient_temperature),
            tick_period_ms: self.tick_period_ms.unwrap_or(defaults.tick_period_ms),
            reset_integral_on_setpoint: self
                .reset_integral_on_setpoint
                .unwrap_or(defaults.reset_integral_on_setpoint),
            at_target_band: self.at_target_band.unwrap_or(defaults.at_target_band),
        };
        (config, self.schedule)
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub tick_period_ms: Option<u32>,
    pub setpoint: Option<f64>,
    /// Force proportional-only control
    pub proportional: bool,
}

impl Overrides {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(period) = self.tick_period_ms {
            config.tick_period_ms = period;
        }
        if let Some(setpoint) = self.setpoint {
            config.initial_setpoint = setpoint;
        }
        if self.proportional {
            config.controller.mode = Some(ControlMode::Proportional);
        }
    }
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    pub schedule: Schedule,
}

/// Parse and validate configuration text
pub fn parse_config(text: &str, overrides: &Overrides) -> Result<RunConfig> {
    let file: FileConfig = toml::from_str(text).context("failed to parse configuration")?;
    let (mut simulation, schedule) = file.into_parts();
    overrides.apply(&mut simulation);

    simulation
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {e}"))?;

    let schedule = Schedule::new(schedule);
    schedule
        .validate()
        .map_err(|(minute, e)| anyhow!("invalid schedule entry at minute {minute}: {e}"))?;

    Ok(RunConfig {
        simulation,
        schedule,
    })
}

/// Load configuration from `path`, or defaults when no file is given
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<RunConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_config(&text, overrides).with_context(|| format!("in {}", path.display()))?
        }
        None => {
            info!("No configuration file, using defaults");
            parse_config("", overrides)?
        }
    };

    log_config_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &RunConfig) {
    let simulation = &config.simulation;
    info!("Configuration loaded successfully");
    debug!("  tick period {} ms", simulation.tick_period_ms);
    debug!("  initial temperature {} °C", simulation.initial_temperature);
    debug!(
        "  integral reset on setpoint change: {}",
        simulation.reset_integral_on_setpoint
    );
    debug!("  at-target band ±{} °C", simulation.at_target_band);
    debug!("  {} scheduled commands", config.schedule.len());
}
