//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.

pub mod registry_service;

pub use registry_service::RegistryService;
