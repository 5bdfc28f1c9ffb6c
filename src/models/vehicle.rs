//! Modelo de Vehicle
//!
//! Este módulo contiene la entidad persistida del registro.
//! Mapea exactamente a la tabla `vehicles` con primary key 'id' y clave única 'vin'.

use sqlx::FromRow;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub vin: String,
    pub production_year: Option<i32>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

/// Vehículo aún no persistido; el id lo asigna el repositorio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub vin: String,
    pub production_year: Option<i32>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl NewVehicle {
    /// Materializar la entidad con el id asignado
    pub fn with_id(self, id: i32) -> Vehicle {
        Vehicle {
            id,
            vin: self.vin,
            production_year: self.production_year,
            brand: self.brand,
            model: self.model,
        }
    }
}
