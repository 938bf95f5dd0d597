//! Component traits
//!
//! These traits define the seams between the tick driver and the pieces it
//! drives: the controller, the thermal model and the display collaborator.

pub mod controller;
pub mod plant;
pub mod telemetry;

pub use controller::Controller;
pub use plant::PlantModel;
pub use telemetry::TelemetrySink;
