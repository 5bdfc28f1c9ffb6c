//! Repositorio en memoria
//!
//! Implementación de `VehicleRepository` sin base de datos, para desarrollo
//! local (`STORAGE_BACKEND=memory`) y para los tests de la API.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::vehicle_repository::VehicleRepository;
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::{internal_error, AppError};

#[derive(Default)]
struct Store {
    next_id: i32,
    // Orden de inserción == id ascendente
    vehicles: Vec<Vehicle>,
}

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    store: RwLock<Store>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn vin_taken(vehicles: &[Vehicle], vin: &str, except_id: Option<i32>) -> bool {
    vehicles
        .iter()
        .any(|v| v.vin == vin && Some(v.id) != except_id)
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let store = self.store.read().await;
        Ok(store.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        let store = self.store.read().await;
        Ok(store.vehicles.iter().find(|v| v.vin == vin).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let store = self.store.read().await;
        Ok(store.vehicles.clone())
    }

    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let mut store = self.store.write().await;
        if vin_taken(&store.vehicles, &vehicle.vin, None) {
            return Err(internal_error(&format!(
                "duplicate key value violates unique constraint on vin '{}'",
                vehicle.vin
            )));
        }

        store.next_id += 1;
        let vehicle = vehicle.with_id(store.next_id);
        store.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
        let mut store = self.store.write().await;
        if vin_taken(&store.vehicles, &vehicle.vin, Some(vehicle.id)) {
            return Err(internal_error(&format!(
                "duplicate key value violates unique constraint on vin '{}'",
                vehicle.vin
            )));
        }

        let slot = store
            .vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or_else(|| internal_error(&format!("no row with id {}", vehicle.id)))?;
        *slot = vehicle.clone();
        Ok(vehicle)
    }

    async fn delete(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        store.vehicles.retain(|v| v.id != vehicle.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_vehicle(vin: &str) -> NewVehicle {
        NewVehicle {
            vin: vin.to_string(),
            production_year: Some(2020),
            brand: Some("TST".to_string()),
            model: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryVehicleRepository::new();
        let first = repo.insert(new_vehicle("a")).await.unwrap();
        let second = repo.insert(new_vehicle("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryVehicleRepository::new();
        for vin in ["c", "a", "b"] {
            repo.insert(new_vehicle(vin)).await.unwrap();
        }

        let vins: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.vin)
            .collect();
        assert_eq!(vins, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_duplicate_vin_is_rejected() {
        let repo = InMemoryVehicleRepository::new();
        repo.insert(new_vehicle("dup")).await.unwrap();

        let result = repo.insert(new_vehicle("dup")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_vin_is_rejected() {
        let repo = InMemoryVehicleRepository::new();
        repo.insert(new_vehicle("a")).await.unwrap();
        let mut b = repo.insert(new_vehicle("b")).await.unwrap();

        b.vin = "a".to_string();
        assert!(repo.update(b).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_vehicle() {
        let repo = InMemoryVehicleRepository::new();
        let vehicle = repo.insert(new_vehicle("gone")).await.unwrap();

        repo.delete(&vehicle).await.unwrap();
        assert!(repo.find_by_vin("gone").await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
