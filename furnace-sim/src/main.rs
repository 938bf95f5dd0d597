//! Furnace Sim - electric furnace temperature regulation simulator
//!
//! Runs a PI (or proportional-only) controller against a first-order
//! thermal model in accelerated real time. Commands are read from stdin:
//! `setpoint <C>`, `door open`, `door close`, `quit`.

use anyhow::{Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_time::Duration;
use log::{error, info};

use furnace_core::config::{ControlMode, OUTPUT_MAX};
use furnace_core::traits::Controller;
use furnace_drivers::FurnaceController;
use furnace_sim::channels::{RunOutcome, StopReason, FINISHED};
use furnace_sim::cli::Args;
use furnace_sim::config::{load_config, RunConfig};
use furnace_sim::input::spawn_stdin_reader;
use furnace_sim::tasks::simulation_task;
use furnace_sim::{build_furnace, Furnace};

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let args = Args::parse();

    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    if let Err(e) = start(&spawner, &args) {
        error!("{e:#}");
        std::process::exit(2);
    }

    let outcome = FINISHED.wait().await;
    log_outcome(&outcome);
    std::process::exit(outcome.reason.exit_code());
}

/// Load configuration, build the furnace and spawn the tasks
fn start(spawner: &Spawner, args: &Args) -> Result<()> {
    let RunConfig {
        simulation,
        schedule,
    } = load_config(args.config.as_deref(), &args.overrides())?;

    let furnace =
        build_furnace(&simulation).map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    log_banner(&furnace, simulation.tick_period_ms);

    if !args.no_stdin {
        spawn_stdin_reader().context("failed to start stdin reader")?;
        info!("Commands: setpoint <C> | door open | door close | quit");
    }

    let tick_period = Duration::from_millis(u64::from(simulation.tick_period_ms));
    spawner
        .spawn(simulation_task(furnace, schedule, tick_period, args.ticks))
        .map_err(|e| anyhow::anyhow!("failed to spawn simulation task: {e:?}"))?;

    Ok(())
}

/// Startup banner with the active parameters
fn log_banner(furnace: &Furnace, tick_period_ms: u32) {
    let state = furnace.state();
    let plant = furnace.plant().params();

    match furnace.controller().mode() {
        ControlMode::ProportionalIntegral => info!("Simulation started (PI control)"),
        ControlMode::Proportional => info!("Simulation started (proportional control)"),
    }
    info!("Initial setpoint = {} °C", state.setpoint);
    match furnace.controller() {
        FurnaceController::Proportional(c) => {
            info!("Controller: Kp={}", c.kp())
        }
        FurnaceController::ProportionalIntegral(c) => info!(
            "Controller: Kp={}, Ki={}, integral limit ±{}",
            c.coefficients().kp,
            c.coefficients().ki,
            c.integral_limit()
        ),
    }
    info!(
        "Plant: heating rate={} °C/min, loss coefficient={}, ambient={} °C",
        plant.max_heating_rate, plant.loss_coefficient, plant.ambient_temperature
    );
    info!(
        "Door: initial drop={} °C, loss={} °C/min",
        plant.door_initial_drop, plant.door_loss_per_minute
    );
    match furnace.plant().equilibrium(OUTPUT_MAX) {
        Some(ceiling) => info!("Full-power equilibrium (door closed) = {ceiling:.1} °C"),
        None => info!("No ambient loss: temperature is unbounded at full power"),
    }
    info!("1 simulated minute = {tick_period_ms} ms");
}

/// End-of-run report
fn log_outcome(outcome: &RunOutcome) {
    match outcome.reason {
        StopReason::Quit => info!("Stopped by operator"),
        StopReason::TickLimit => info!("Tick limit reached"),
        StopReason::Fault(e) => error!("Aborted: {e}"),
    }

    let state = outcome.state;
    info!(
        "t={} min, setpoint {} °C, temperature {:.2} °C",
        state.time_step, state.setpoint, state.measured_temperature
    );

    if let Some(summary) = outcome.summary {
        info!(
            "Last {} of {} ticks: peak {:.2} °C, final {:.2} °C, mean |error| {:.2} °C, {} saturated",
            summary.window,
            summary.ticks,
            summary.peak_temperature,
            summary.final_temperature,
            summary.mean_abs_error,
            summary.saturated_ticks
        );
    }
}
