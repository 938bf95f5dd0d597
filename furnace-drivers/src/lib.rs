//! Controller and plant implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in furnace-core:
//!
//! - Controllers (proportional, proportional-integral with anti-windup)
//! - Thermal plant (first-order model with door disturbance)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod controller;
pub mod plant;

pub use controller::{FurnaceController, PiController, ProportionalController};
pub use plant::FirstOrderPlant;
