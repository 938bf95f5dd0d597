//! Simulation task
//!
//! Ticks the furnace once per `tick_period_ms`. Scripted commands and
//! operator input are applied at the start of each tick, so a tick always
//! sees one consistent setpoint and door state.

use embassy_time::{Duration, Ticker};
use log::{error, info, warn};

use furnace_core::config::SimulationConfig;
use furnace_core::sim::Simulation;
use furnace_core::state::{Command, CommandEffect, DoorTransition};
use furnace_core::traits::TelemetrySink;
use furnace_core::SimError;
use furnace_drivers::{FirstOrderPlant, FurnaceController};

use crate::channels::{RunOutcome, StopReason, FINISHED, INPUT_CHANNEL};
use crate::config::Schedule;
use crate::display::ConsoleSink;
use crate::input::Input;

/// The simulation as configured at runtime
pub type Furnace = Simulation<FurnaceController, FirstOrderPlant>;

/// Build the controller, plant and driver from one configuration
pub fn build_furnace(config: &SimulationConfig) -> Result<Furnace, SimError> {
    let controller = FurnaceController::from_parameters(&config.controller)?;
    let plant = FirstOrderPlant::new(config.plant)?;
    Simulation::new(controller, plant, config)
}

/// Stepping state shared by the task and tests
pub struct Runner<S> {
    furnace: Furnace,
    schedule: Schedule,
    /// Stop after this many simulated minutes
    tick_limit: Option<u32>,
    sink: S,
}

impl<S: TelemetrySink> Runner<S> {
    pub fn new(furnace: Furnace, schedule: Schedule, tick_limit: Option<u32>, sink: S) -> Self {
        Self {
            furnace,
            schedule,
            tick_limit,
            sink,
        }
    }

    pub fn furnace(&self) -> &Furnace {
        &self.furnace
    }

    /// Run one tick boundary: scripted commands, then operator input, then
    /// the tick itself
    ///
    /// Returns `Some` once the run should stop.
    pub fn step(&mut self, inputs: impl IntoIterator<Item = Input>) -> Option<StopReason> {
        if self
            .tick_limit
            .is_some_and(|limit| self.furnace.state().time_step >= limit)
        {
            return Some(StopReason::TickLimit);
        }

        let minute = self.furnace.state().time_step.saturating_add(1);
        let scheduled: Vec<Command> = self.schedule.take_due(minute).collect();
        for command in scheduled {
            info!("t={minute} min: scheduled {command:?}");
            apply_command(&mut self.furnace, command);
        }

        for input in inputs {
            match input {
                Input::Command(command) => apply_command(&mut self.furnace, command),
                Input::Quit => {
                    info!("Quit requested");
                    return Some(StopReason::Quit);
                }
            }
        }

        if let Err(e) = self.furnace.tick_into(&mut self.sink) {
            error!("Simulation stopped: {e}");
            return Some(StopReason::Fault(e));
        }

        match self.tick_limit {
            Some(limit) if self.furnace.state().time_step >= limit => {
                Some(StopReason::TickLimit)
            }
            _ => None,
        }
    }

    /// Final report for `reason`
    pub fn outcome(&self, reason: StopReason) -> RunOutcome {
        RunOutcome {
            reason,
            state: self.furnace.state(),
            summary: self.furnace.summary(),
        }
    }
}

/// Apply one command and log what changed
fn apply_command(furnace: &mut Furnace, command: Command) {
    match furnace.apply(command) {
        Ok(CommandEffect::Setpoint {
            from,
            to,
            integral_reset,
        }) => {
            if integral_reset {
                info!("Setpoint {from} -> {to} °C (integral reset)");
            } else {
                info!("Setpoint {from} -> {to} °C");
            }
        }
        Ok(CommandEffect::Door(DoorTransition::Opened)) => info!("Door opened"),
        Ok(CommandEffect::Door(DoorTransition::Closed)) => info!("Door closed"),
        Ok(CommandEffect::Door(DoorTransition::Unchanged)) => {}
        Err(e) => warn!("Rejected {command:?}: {e}"),
    }
}

/// Simulation task - one tick per period until quit, tick limit or fault
#[embassy_executor::task]
pub async fn simulation_task(
    furnace: Furnace,
    schedule: Schedule,
    tick_period: Duration,
    tick_limit: Option<u32>,
) {
    info!("Simulation task started");

    let mut runner = Runner::new(furnace, schedule, tick_limit, ConsoleSink::new());
    let mut ticker = Ticker::every(tick_period);

    loop {
        ticker.next().await;

        let inputs = core::iter::from_fn(|| INPUT_CHANNEL.try_receive().ok());
        if let Some(reason) = runner.step(inputs) {
            FINISHED.signal(runner.outcome(reason));
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduledCommand;
    use furnace_core::sim::TickRecord;
    use furnace_core::traits::telemetry::NullSink;
    use furnace_core::error::StateField;
    use furnace_core::config::PlantParameters;

    const IDLE: [Input; 0] = [];

    #[derive(Default)]
    struct Recorder {
        records: Vec<TickRecord>,
    }

    impl TelemetrySink for Recorder {
        fn publish(&mut self, record: &TickRecord) {
            self.records.push(*record);
        }
    }

    fn runner(schedule: Vec<ScheduledCommand>, tick_limit: Option<u32>) -> Runner<Recorder> {
        let furnace = build_furnace(&SimulationConfig::default()).unwrap();
        Runner::new(furnace, Schedule::new(schedule), tick_limit, Recorder::default())
    }

    #[test]
    fn test_tick_limit() {
        let mut runner = runner(Vec::new(), Some(3));
        assert_eq!(runner.step(IDLE), None);
        assert_eq!(runner.step(IDLE), None);
        assert_eq!(runner.step(IDLE), Some(StopReason::TickLimit));
        assert_eq!(runner.sink.records.len(), 3);

        // No further ticks once the limit is reached
        assert_eq!(runner.step(IDLE), Some(StopReason::TickLimit));
        assert_eq!(runner.sink.records.len(), 3);
    }

    #[test]
    fn test_zero_tick_limit_runs_nothing() {
        let mut runner = runner(Vec::new(), Some(0));
        assert_eq!(runner.step(IDLE), Some(StopReason::TickLimit));
        assert!(runner.sink.records.is_empty());
        assert_eq!(runner.outcome(StopReason::TickLimit).summary, None);
    }

    #[test]
    fn test_scheduled_door_applies_before_tick() {
        let mut runner = runner(
            vec![ScheduledCommand {
                at_minute: 2,
                command: Command::SetDoor(true),
            }],
            None,
        );
        runner.step(IDLE);
        assert!(!runner.sink.records[0].door_open);

        runner.step(IDLE);
        let record = runner.sink.records[1];
        assert_eq!(record.time_step, 2);
        assert!(record.door_open);
        assert!((record.temperature - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_operator_input_applies_in_order() {
        let mut runner = runner(Vec::new(), None);
        runner.step([
            Input::Command(Command::SetSetpoint(100.0)),
            Input::Command(Command::SetSetpoint(150.0)),
        ]);
        assert_eq!(runner.sink.records[0].setpoint, 150.0);
    }

    #[test]
    fn test_scheduled_before_operator_input() {
        let mut runner = runner(
            vec![ScheduledCommand {
                at_minute: 1,
                command: Command::SetSetpoint(100.0),
            }],
            None,
        );
        runner.step([Input::Command(Command::SetSetpoint(150.0))]);
        assert_eq!(runner.sink.records[0].setpoint, 150.0);
    }

    #[test]
    fn test_quit_skips_the_tick() {
        let mut runner = runner(Vec::new(), None);
        runner.step(IDLE);
        let reason = runner.step([Input::Command(Command::SetDoor(true)), Input::Quit]);
        assert_eq!(reason, Some(StopReason::Quit));
        assert_eq!(runner.sink.records.len(), 1);

        let outcome = runner.outcome(StopReason::Quit);
        assert_eq!(outcome.state.time_step, 1);
        assert_eq!(outcome.summary.unwrap().ticks, 1);
    }

    #[test]
    fn test_fault_stops_the_run() {
        let config = SimulationConfig {
            plant: PlantParameters {
                loss_coefficient: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let furnace = build_furnace(&config).unwrap();
        let mut runner = Runner::new(furnace, Schedule::default(), None, NullSink);

        let mut reason = None;
        for _ in 0..2000 {
            reason = runner.step(IDLE);
            if reason.is_some() {
                break;
            }
        }
        let reason = reason.unwrap();
        assert_eq!(
            reason,
            StopReason::Fault(SimError::InvalidState(StateField::Temperature))
        );
        assert_eq!(reason.exit_code(), 1);
        assert!(runner.furnace().state().measured_temperature.is_finite());
    }

    #[test]
    fn test_build_furnace_rejects_invalid_config() {
        let config = SimulationConfig {
            tick_period_ms: 0,
            ..Default::default()
        };
        assert!(build_furnace(&config).is_err());
    }
}
