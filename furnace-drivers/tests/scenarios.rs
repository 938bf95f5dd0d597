//! Closed-loop scenarios with the shipped calibration

use furnace_core::config::{ControllerParameters, PlantParameters, SimulationConfig};
use furnace_core::error::StateField;
use furnace_core::sim::{Simulation, TickRecord};
use furnace_core::state::Command;
use furnace_core::traits::telemetry::NullSink;
use furnace_core::SimError;
use furnace_drivers::{FirstOrderPlant, FurnaceController};

type Furnace = Simulation<FurnaceController, FirstOrderPlant>;

fn furnace(config: &SimulationConfig) -> Furnace {
    let controller = FurnaceController::from_parameters(&config.controller).unwrap();
    let plant = FirstOrderPlant::new(config.plant).unwrap();
    Simulation::new(controller, plant, config).unwrap()
}

fn run(sim: &mut Furnace, ticks: u32) -> TickRecord {
    let mut last = None;
    for _ in 0..ticks {
        last = Some(sim.tick().unwrap());
    }
    last.unwrap()
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

#[test]
fn test_first_tick_from_cold() {
    let mut sim = furnace(&SimulationConfig::default());
    let record = sim.tick().unwrap();

    assert_eq!(record.time_step, 1);
    assert_eq!(record.error, 155.0);
    assert_eq!(record.integral, Some(155.0));
    assert_eq!(record.power, 100.0);
    assert!(close(record.temperature, 45.0, 1e-9));
}

#[test]
fn test_door_opens_at_second_tick() {
    let mut sim = furnace(&SimulationConfig::default());
    sim.tick().unwrap();

    sim.apply(Command::SetDoor(true)).unwrap();
    let record = sim.tick().unwrap();

    // 45 - 8 (drop) + 20 (heating) - 2 (cooling) - 6 (door loss)
    assert_eq!(record.measurement, 45.0);
    assert_eq!(record.power, 100.0);
    assert!(record.door_open);
    assert!(close(record.temperature, 49.0, 1e-9));

    // Third tick: door still open, no second drop
    // 49 + 20 - 2.4 - 6
    let record = sim.tick().unwrap();
    assert!(close(record.temperature, 60.6, 1e-9));
}

#[test]
fn test_pi_settles_on_setpoint() {
    let mut sim = furnace(&SimulationConfig::default());
    let record = run(&mut sim, 120);

    assert!(close(record.temperature, 180.0, 0.01));
    assert!(sim.is_at_target());

    // Steady state needs 77.5% power: 0.1 * 155 / 0.2
    assert!(close(record.power, 77.5, 0.01));

    // Anti-windup keeps the overshoot modest
    let summary = sim.summary().unwrap();
    assert!(summary.peak_temperature > 180.0);
    assert!(summary.peak_temperature < 195.0);
}

#[test]
fn test_proportional_keeps_steady_state_error() {
    let config = SimulationConfig {
        controller: ControllerParameters::proportional(0.9),
        ..Default::default()
    };
    let mut sim = furnace(&config);
    let record = run(&mut sim, 200);

    // 0.2 * 0.9 * e = 0.1 * (155 - e)
    let expected_error = 15.5 / 0.28;
    assert!(close(record.error, expected_error, 1e-6));
    assert_eq!(record.integral, None);
    assert!(!sim.is_at_target());
}

#[test]
fn test_door_held_open_saturates() {
    let mut sim = furnace(&SimulationConfig::default());
    run(&mut sim, 99);
    sim.apply(Command::SetDoor(true)).unwrap();
    let record = run(&mut sim, 200);

    // Full power cannot beat the door loss: 25 + (20 - 6) / 0.1
    assert_eq!(record.power, 100.0);
    assert!(close(record.temperature, 165.0, 0.01));

    // Integral pinned at the anti-windup limit
    assert_eq!(sim.state().integral_accumulator, Some(500.0));
}

#[test]
fn test_setpoint_change_resets_integral() {
    let mut sim = furnace(&SimulationConfig::default());
    run(&mut sim, 60);
    assert!(sim.state().integral_accumulator.unwrap() > 300.0);

    sim.apply(Command::SetSetpoint(120.0)).unwrap();
    assert_eq!(sim.state().integral_accumulator, Some(0.0));

    let record = sim.tick().unwrap();
    assert_eq!(record.setpoint, 120.0);
    assert!(record.error < 0.0);
    assert_eq!(record.power, 0.0);
}

#[test]
fn test_unstable_plant_detected() {
    // A loss coefficient above 2 makes the explicit update oscillate with
    // growing amplitude until it overflows
    let config = SimulationConfig {
        plant: PlantParameters {
            loss_coefficient: 5.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut sim = furnace(&config);

    let mut result = Ok(());
    for _ in 0..2000 {
        if let Err(e) = sim.tick() {
            result = Err(e);
            break;
        }
    }
    assert_eq!(result, Err(SimError::InvalidState(StateField::Temperature)));
}

#[test]
fn test_run_publishes_every_tick() {
    let mut sim = furnace(&SimulationConfig::default());
    sim.run(10, &mut NullSink).unwrap();
    assert_eq!(sim.state().time_step, 10);
    assert_eq!(sim.history().len(), 10);
}
