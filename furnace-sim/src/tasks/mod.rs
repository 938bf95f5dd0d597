//! Embassy tasks

pub mod simulation;

pub use simulation::simulation_task;
