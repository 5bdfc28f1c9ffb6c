//! Modelos de datos
//!
//! Entidades persistidas del registro.

pub mod vehicle;

pub use vehicle::{NewVehicle, Vehicle};
