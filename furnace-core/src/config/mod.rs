//! Configuration types
//!
//! Controller, plant and run parameters with construction-time validation.

pub mod types;

pub use types::*;
