//! Configuration type definitions
//!
//! These types are fixed at construction time. The host runtime fills them
//! from a TOML file; missing keys fall back to the shipped calibration.

use crate::error::{ConfigField, SimError};
use crate::safety::{is_non_negative, is_positive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest controller output (% power)
pub const OUTPUT_MIN: f64 = 0.0;

/// Highest controller output (% power)
pub const OUTPUT_MAX: f64 = 100.0;

/// Default tick period (one simulated minute per wall-clock second)
pub const DEFAULT_TICK_PERIOD_MS: u32 = 1000;

/// Controller variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControlMode {
    /// Proportional only
    Proportional,
    /// Proportional-integral with anti-windup
    ProportionalIntegral,
}

/// Controller gains
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControllerParameters {
    /// Proportional gain (% power per °C of error)
    pub kp: f64,
    /// Integral gain (% power per °C·min of accumulated error)
    ///
    /// Zero selects proportional-only control unless `mode` says otherwise.
    pub ki: f64,
    /// Explicit variant selection; `None` derives it from `ki`
    pub mode: Option<ControlMode>,
}

impl Default for ControllerParameters {
    fn default() -> Self {
        Self {
            kp: 0.9,
            ki: 0.2,
            mode: None,
        }
    }
}

impl ControllerParameters {
    /// Proportional-only gains
    pub const fn proportional(kp: f64) -> Self {
        Self {
            kp,
            ki: 0.0,
            mode: Some(ControlMode::Proportional),
        }
    }

    /// Proportional-integral gains
    pub const fn proportional_integral(kp: f64, ki: f64) -> Self {
        Self {
            kp,
            ki,
            mode: Some(ControlMode::ProportionalIntegral),
        }
    }

    /// Resolved controller variant
    pub fn mode(&self) -> ControlMode {
        match self.mode {
            Some(mode) => mode,
            None if self.ki > 0.0 => ControlMode::ProportionalIntegral,
            None => ControlMode::Proportional,
        }
    }

    /// Anti-windup bound for the integral accumulator (°C·min)
    ///
    /// Sized so that the integral term alone can span the full output
    /// range: `Ki * limit == OUTPUT_MAX`. `None` when `Ki` is zero.
    pub fn integral_limit(&self) -> Option<f64> {
        if is_positive(self.ki) {
            Some(OUTPUT_MAX / self.ki)
        } else {
            None
        }
    }

    /// Validate gains
    pub fn validate(&self) -> Result<(), SimError> {
        if !is_positive(self.kp) {
            return Err(SimError::InvalidConfiguration(ConfigField::Kp));
        }
        if !is_non_negative(self.ki) {
            return Err(SimError::InvalidConfiguration(ConfigField::Ki));
        }
        if self.mode() == ControlMode::ProportionalIntegral && self.ki <= 0.0 {
            return Err(SimError::InvalidConfiguration(ConfigField::Ki));
        }
        Ok(())
    }
}

/// First-order thermal model parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PlantParameters {
    /// Heating rate at 100% power (°C/min)
    pub max_heating_rate: f64,
    /// Fraction of the excess over ambient lost per minute
    pub loss_coefficient: f64,
    /// Ambient temperature (°C)
    pub ambient_temperature: f64,
    /// Instantaneous drop when the door opens (°C, once per opening)
    pub door_initial_drop: f64,
    /// Continuous loss while the door stays open (°C/min)
    pub door_loss_per_minute: f64,
}

impl Default for PlantParameters {
    fn default() -> Self {
        Self {
            max_heating_rate: 20.0,
            loss_coefficient: 0.10,
            ambient_temperature: 25.0,
            door_initial_drop: 8.0,
            door_loss_per_minute: 6.0,
        }
    }
}

impl PlantParameters {
    /// Validate model parameters
    pub fn validate(&self) -> Result<(), SimError> {
        let checks = [
            (is_positive(self.max_heating_rate), ConfigField::MaxHeatingRate),
            (is_non_negative(self.loss_coefficient), ConfigField::LossCoefficient),
            (self.ambient_temperature.is_finite(), ConfigField::AmbientTemperature),
            (is_non_negative(self.door_initial_drop), ConfigField::DoorInitialDrop),
            (is_non_negative(self.door_loss_per_minute), ConfigField::DoorLossPerMinute),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, field)) => Err(SimError::InvalidConfiguration(*field)),
            None => Ok(()),
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Controller gains
    pub controller: ControllerParameters,
    /// Thermal model
    pub plant: PlantParameters,
    /// Setpoint at start (°C)
    pub initial_setpoint: f64,
    /// Furnace temperature at start (°C)
    pub initial_temperature: f64,
    /// Wall-clock time per simulated minute (ms)
    pub tick_period_ms: u32,
    /// Clear the integral accumulator whenever the setpoint changes
    pub reset_integral_on_setpoint: bool,
    /// Tolerance for "at target" reporting (°C)
    pub at_target_band: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            controller: ControllerParameters::default(),
            plant: PlantParameters::default(),
            initial_setpoint: 180.0,
            initial_temperature: 25.0,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            reset_integral_on_setpoint: true,
            at_target_band: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), SimError> {
        self.controller.validate()?;
        self.plant.validate()?;

        if !self.initial_setpoint.is_finite() {
            return Err(SimError::InvalidConfiguration(ConfigField::InitialSetpoint));
        }
        if !self.initial_temperature.is_finite() {
            return Err(SimError::InvalidConfiguration(ConfigField::InitialTemperature));
        }
        if self.tick_period_ms == 0 {
            return Err(SimError::InvalidConfiguration(ConfigField::TickPeriod));
        }
        if !is_non_negative(self.at_target_band) {
            return Err(SimError::InvalidConfiguration(ConfigField::AtTargetBand));
        }
        Ok(())
    }
}
