//! Error types shared by the core, drivers and host runtime

use core::fmt;

/// Configuration values that can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    /// Proportional gain must be finite and > 0
    Kp,
    /// Integral gain must be finite and >= 0 (> 0 when PI is forced)
    Ki,
    /// Heating rate at full power must be finite and > 0
    MaxHeatingRate,
    /// Loss coefficient must be finite and >= 0
    LossCoefficient,
    /// Ambient temperature must be finite
    AmbientTemperature,
    /// One-shot door drop must be finite and >= 0
    DoorInitialDrop,
    /// Continuous door loss must be finite and >= 0
    DoorLossPerMinute,
    /// Initial setpoint must be finite
    InitialSetpoint,
    /// Initial temperature must be finite
    InitialTemperature,
    /// Tick period must be > 0
    TickPeriod,
    /// At-target band must be finite and >= 0
    AtTargetBand,
    /// Scripted setpoint commands must be finite
    ScheduledSetpoint,
}

impl ConfigField {
    /// Configuration key name, as written in the config file
    pub const fn name(&self) -> &'static str {
        match self {
            ConfigField::Kp => "kp",
            ConfigField::Ki => "ki",
            ConfigField::MaxHeatingRate => "max_heating_rate",
            ConfigField::LossCoefficient => "loss_coefficient",
            ConfigField::AmbientTemperature => "ambient_temperature",
            ConfigField::DoorInitialDrop => "door_initial_drop",
            ConfigField::DoorLossPerMinute => "door_loss_per_minute",
            ConfigField::InitialSetpoint => "initial_setpoint",
            ConfigField::InitialTemperature => "initial_temperature",
            ConfigField::TickPeriod => "tick_period_ms",
            ConfigField::AtTargetBand => "at_target_band",
            ConfigField::ScheduledSetpoint => "schedule.command.set_setpoint",
        }
    }
}

/// Runtime values guarded against NaN / infinity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateField {
    /// Requested or current setpoint
    Setpoint,
    /// Measured or freshly computed furnace temperature
    Temperature,
}

/// Errors raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// A parameter failed validation at construction time
    InvalidConfiguration(ConfigField),
    /// A runtime value is not a finite number
    InvalidState(StateField),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(field) => {
                write!(f, "invalid configuration: {} out of range", field.name())
            }
            SimError::InvalidState(StateField::Setpoint) => {
                write!(f, "invalid state: setpoint is not a finite number")
            }
            SimError::InvalidState(StateField::Temperature) => {
                write!(f, "invalid state: temperature is not a finite number")
            }
        }
    }
}
