//! Thermal plant implementations

pub mod first_order;

pub use first_order::FirstOrderPlant;
