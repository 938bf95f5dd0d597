//! Furnace simulator host runtime
//!
//! Runs the closed-loop simulation on the embassy std executor: one tick per
//! `tick_period_ms`, operator input from stdin and from a scripted schedule,
//! telemetry through `log`.

pub mod channels;
pub mod cli;
pub mod config;
pub mod display;
pub mod input;
pub mod tasks;

pub use tasks::simulation::{build_furnace, Furnace};
