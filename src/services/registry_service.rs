//! Servicio de registro de vehículos
//!
//! Reglas de negocio del registro: comprobación de existencia por VIN,
//! actualización parcial y semántica de "no encontrado".

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::dto::vehicle_dto::VehicleRepresentation;
use crate::models::vehicle::NewVehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub const VEHICLE_NOT_FOUND: &str = "Vehicle with given VIN does not exist.";
pub const NO_VEHICLES_FOUND: &str = "No vehicles found";

pub struct RegistryService {
    repository: Arc<dyn VehicleRepository>,
}

impl RegistryService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    /// Obtener un vehículo por VIN
    pub async fn get(&self, vin: &str) -> AppResult<VehicleRepresentation> {
        let found = self
            .repository
            .find_by_vin(vin)
            .await?
            .ok_or_else(|| not_found_error(VEHICLE_NOT_FOUND))?;

        let representation = VehicleRepresentation::from(found);
        info!("🚗 Devolviendo vehículo: {:?}", representation);
        Ok(representation)
    }

    /// Listar todos los vehículos en orden de inserción.
    /// Un registro vacío se considera "no encontrado".
    pub async fn get_all(&self) -> AppResult<Vec<VehicleRepresentation>> {
        let vehicles = self.repository.find_all().await?;

        if vehicles.is_empty() {
            return Err(not_found_error(NO_VEHICLES_FOUND));
        }

        debug!("📋 {} vehículos en el registro", vehicles.len());
        Ok(vehicles.into_iter().map(VehicleRepresentation::from).collect())
    }

    /// Crear un vehículo. La unicidad del VIN la garantiza la persistencia.
    pub async fn create(&self, representation: VehicleRepresentation) -> AppResult<VehicleRepresentation> {
        representation.validate()?;
        let vehicle = NewVehicle::try_from(representation)?;

        let created = self.repository.insert(vehicle).await?;
        info!("✅ Vehículo creado: id={}, vin='{}'", created.id, created.vin);
        Ok(created.into())
    }

    /// Eliminar un vehículo por VIN; si no existe no hace nada
    pub async fn delete(&self, vin: &str) -> AppResult<()> {
        let Some(to_delete) = self.repository.find_by_vin(vin).await? else {
            debug!("🗑️ VIN '{}' no registrado, nada que eliminar", vin);
            return Ok(());
        };

        self.repository.delete(&to_delete).await?;
        info!("🗑️ Vehículo eliminado: id={}, vin='{}'", to_delete.id, to_delete.vin);
        Ok(())
    }

    /// Actualización parcial: sólo los campos no nulos sobrescriben
    pub async fn update(
        &self,
        vin: &str,
        representation: VehicleRepresentation,
    ) -> AppResult<VehicleRepresentation> {
        // La existencia del VIN se comprueba antes que el contenido del body
        let mut to_update = self
            .repository
            .find_by_vin(vin)
            .await?
            .ok_or_else(|| not_found_error(VEHICLE_NOT_FOUND))?;

        representation.validate()?;
        representation.merge_into(&mut to_update);

        let updated = self.repository.update(to_update).await?;
        info!("✏️ Vehículo actualizado: id={}, vin='{}'", updated.id, updated.vin);
        Ok(updated.into())
    }
}
