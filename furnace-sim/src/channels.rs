//! Inter-task communication channels
//!
//! Defines the static channels shared by the simulation task, the stdin
//! reader thread and the main task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use furnace_core::sim::RunSummary;
use furnace_core::state::SimulationState;
use furnace_core::SimError;

use crate::input::Input;

/// Channel capacity for operator input
pub const INPUT_CHANNEL_SIZE: usize = 16;

/// Operator input from the stdin reader, drained at each tick boundary
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, Input, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Why the simulation task stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    /// Operator sent `quit`
    Quit,
    /// Configured number of ticks reached
    TickLimit,
    /// A tick produced a non-finite value
    Fault(SimError),
}

impl StopReason {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            StopReason::Quit | StopReason::TickLimit => 0,
            StopReason::Fault(_) => 1,
        }
    }
}

/// Final report from the simulation task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    pub reason: StopReason,
    /// State at the last good tick
    pub state: SimulationState,
    /// Statistics over the retained window, `None` if no tick ran
    pub summary: Option<RunSummary>,
}

/// Signal that the simulation task has stopped
pub static FINISHED: Signal<CriticalSectionRawMutex, RunOutcome> = Signal::new();
