//! Board-agnostic core logic for the furnace regulation simulator
//!
//! This crate contains everything that does not depend on a concrete
//! controller, plant model or host runtime:
//!
//! - Controller, plant and telemetry traits
//! - Controller and plant parameter definitions with validation
//! - Door disturbance state machine and external commands
//! - The tick driver and its bounded history window
//! - Finite-value guards for runtime state

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod safety;
pub mod sim;
pub mod state;
pub mod traits;

pub use error::SimError;
