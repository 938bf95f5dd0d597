//! Simulation driver
//!
//! Owns the setpoint, temperature, disturbance state and history, and runs
//! one measure / control / plant cycle per call to [`Simulation::tick`].
//! External inputs are applied between ticks with [`Simulation::apply`], so
//! a tick always sees a consistent setpoint and door state.

use super::history::{History, RunSummary};
use super::TickRecord;
use crate::config::SimulationConfig;
use crate::error::{SimError, StateField};
use crate::safety::ensure_finite;
use crate::state::{Command, CommandEffect, DisturbanceState, DoorTransition, SimulationState};
use crate::traits::{Controller, PlantModel, TelemetrySink};

/// Closed-loop furnace simulation
#[derive(Debug)]
pub struct Simulation<C, P> {
    /// Active controller variant
    controller: C,
    /// Thermal model
    plant: P,
    /// Simulated minutes elapsed
    time_step: u32,
    /// Target temperature (°C)
    setpoint: f64,
    /// Current furnace temperature (°C)
    temperature: f64,
    /// Door bookkeeping
    disturbance: DisturbanceState,
    /// Clear the controller accumulator on setpoint changes
    reset_on_setpoint: bool,
    /// Tolerance for [`Simulation::is_at_target`] (°C)
    at_target_band: f64,
    /// Recent ticks for display
    history: History,
}

impl<C: Controller, P: PlantModel> Simulation<C, P> {
    /// Create a simulation at time zero
    ///
    /// The configuration is validated here; the controller and plant are
    /// expected to have been built from the same configuration.
    pub fn new(controller: C, plant: P, config: &SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;

        Ok(Self {
            controller,
            plant,
            time_step: 0,
            setpoint: config.initial_setpoint,
            temperature: config.initial_temperature,
            disturbance: DisturbanceState::closed(),
            reset_on_setpoint: config.reset_integral_on_setpoint,
            at_target_band: config.at_target_band,
            history: History::new(),
        })
    }

    /// Snapshot of the driver-owned state
    pub fn state(&self) -> SimulationState {
        SimulationState {
            time_step: self.time_step,
            setpoint: self.setpoint,
            measured_temperature: self.temperature,
            integral_accumulator: self.controller.integral(),
        }
    }

    /// Current door bookkeeping
    pub fn disturbance(&self) -> DisturbanceState {
        self.disturbance
    }

    /// Access the controller
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Access the thermal model
    pub fn plant(&self) -> &P {
        &self.plant
    }

    /// Retained tick window
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Statistics over the retained window
    pub fn summary(&self) -> Option<RunSummary> {
        self.history.summary()
    }

    /// Check if the furnace is within the at-target band of the setpoint
    pub fn is_at_target(&self) -> bool {
        let deviation = self.temperature - self.setpoint;
        deviation <= self.at_target_band && deviation >= -self.at_target_band
    }

    /// Apply an external command
    ///
    /// Takes effect on the next tick.
    pub fn apply(&mut self, command: Command) -> Result<CommandEffect, SimError> {
        match command {
            Command::SetSetpoint(setpoint) => self.set_setpoint(setpoint),
            Command::SetDoor(open) => Ok(CommandEffect::Door(self.set_door(open))),
        }
    }

    /// Change the setpoint
    ///
    /// Rejects NaN and infinity. When configured, any change clears the
    /// controller accumulator so stale integral history does not cause
    /// overshoot toward the new target.
    pub fn set_setpoint(&mut self, setpoint: f64) -> Result<CommandEffect, SimError> {
        let setpoint = ensure_finite(setpoint, StateField::Setpoint)?;
        let from = self.setpoint;
        self.setpoint = setpoint;

        let integral_reset = self.reset_on_setpoint && from != setpoint;
        if integral_reset {
            self.controller.reset();
        }

        Ok(CommandEffect::Setpoint {
            from,
            to: setpoint,
            integral_reset,
        })
    }

    /// Open or close the door
    pub fn set_door(&mut self, open: bool) -> DoorTransition {
        self.disturbance.set_door(open)
    }

    /// Clear the controller accumulator explicitly
    pub fn reset_controller(&mut self) {
        self.controller.reset();
    }

    /// Advance one simulated minute
    ///
    /// The sensor is ideal: the measurement is the current temperature with
    /// no noise or delay. Fails with `InvalidState` if the setpoint or
    /// temperature is not finite; the state is left at the last good tick.
    pub fn tick(&mut self) -> Result<TickRecord, SimError> {
        let setpoint = ensure_finite(self.setpoint, StateField::Setpoint)?;
        let measurement = ensure_finite(self.temperature, StateField::Temperature)?;

        let error = setpoint - measurement;
        let power = self.controller.compute(error);
        let temperature = self
            .plant
            .step(measurement, power, &mut self.disturbance);
        let temperature = ensure_finite(temperature, StateField::Temperature)?;

        self.time_step = self.time_step.saturating_add(1);
        self.temperature = temperature;

        let record = TickRecord {
            time_step: self.time_step,
            setpoint,
            measurement,
            power,
            error,
            temperature,
            integral: self.controller.integral(),
            door_open: self.disturbance.door_open(),
        };
        self.history.push(record);

        Ok(record)
    }

    /// Advance one simulated minute and publish the record
    pub fn tick_into<S: TelemetrySink>(&mut self, sink: &mut S) -> Result<TickRecord, SimError> {
        let record = self.tick()?;
        sink.publish(&record);
        Ok(record)
    }

    /// Run `ticks` ticks, stopping at the first error
    pub fn run<S: TelemetrySink>(&mut self, ticks: u32, sink: &mut S) -> Result<(), SimError> {
        for _ in 0..ticks {
            self.tick_into(sink)?;
        }
        Ok(())
    }
}
