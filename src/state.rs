//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::registry_service::RegistryService;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RegistryService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self {
            registry: Arc::new(RegistryService::new(repository)),
        }
    }
}
