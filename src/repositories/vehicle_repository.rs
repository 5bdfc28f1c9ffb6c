use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::AppError;

/// Contrato de persistencia que necesita el servicio de registro.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError>;

    /// `None` cuando ningún vehículo tiene ese VIN.
    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError>;

    /// Todos los vehículos en orden de inserción (id ascendente).
    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError>;

    /// Insertar y devolver la entidad con el id asignado.
    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError>;

    /// Persistir una entidad existente.
    async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, AppError>;

    async fn delete(&self, vehicle: &Vehicle) -> Result<(), AppError>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT id, vin, production_year, brand, model FROM vehicles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT id, vin, production_year, brand, model FROM vehicles WHERE vin = $1",
        )
        .bind(vin)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT id, vin, production_year, brand, model FROM vehicles ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        // Un VIN duplicado falla aquí por la restricción UNIQUE
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vin, production_year, brand, model)
            VALUES ($1, $2, $3, $4)
            RETURNING id, vin, production_year, brand, model
            "#,
        )
        .bind(vehicle.vin)
        .bind(vehicle.production_year)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vin = $2, production_year = $3, brand = $4, model = $5
            WHERE id = $1
            RETURNING id, vin, production_year, brand, model
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.vin)
        .bind(vehicle.production_year)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn delete(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(vehicle.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
