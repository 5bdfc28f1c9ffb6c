use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::utils::errors::{bad_request_error, AppError};

// Representación de vehículo en el wire, usada para crear, actualizar y responder.
// Todos los campos son opcionales en la entrada; un campo ausente se serializa como null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRepresentation {
    #[serde(default)]
    pub id: Option<i32>,

    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub vin: Option<String>,

    #[serde(default)]
    pub production_year: Option<i32>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
}

impl VehicleRepresentation {
    /// Aplicar la actualización parcial sobre la entidad almacenada.
    /// Sólo los campos no nulos sobrescriben; el id nunca se toca.
    pub fn merge_into(self, vehicle: &mut Vehicle) {
        if let Some(vin) = self.vin {
            vehicle.vin = vin;
        }
        if let Some(model) = self.model {
            vehicle.model = Some(model);
        }
        if let Some(brand) = self.brand {
            vehicle.brand = Some(brand);
        }
        if let Some(production_year) = self.production_year {
            vehicle.production_year = Some(production_year);
        }
    }
}

impl From<Vehicle> for VehicleRepresentation {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: Some(vehicle.id),
            vin: Some(vehicle.vin),
            production_year: vehicle.production_year,
            brand: vehicle.brand,
            model: vehicle.model,
        }
    }
}

// El id del cliente se descarta: lo asigna la persistencia
impl TryFrom<VehicleRepresentation> for NewVehicle {
    type Error = AppError;

    fn try_from(representation: VehicleRepresentation) -> Result<Self, Self::Error> {
        let vin = representation
            .vin
            .ok_or_else(|| bad_request_error("VIN is required"))?;

        Ok(Self {
            vin,
            production_year: representation.production_year,
            brand: representation.brand,
            model: representation.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> Vehicle {
        Vehicle {
            id: 7,
            vin: "vinTest".to_string(),
            production_year: Some(2022),
            brand: Some("TST".to_string()),
            model: Some("Test".to_string()),
        }
    }

    #[test]
    fn test_serializes_camel_case_with_nulls() {
        let representation = VehicleRepresentation {
            vin: Some("abc".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&representation).unwrap();
        assert_eq!(
            value,
            json!({
                "id": null,
                "vin": "abc",
                "productionYear": null,
                "brand": null,
                "model": null
            })
        );
    }

    #[test]
    fn test_deserializes_partial_payload() {
        let representation: VehicleRepresentation =
            serde_json::from_value(json!({ "brand": "NEW" })).unwrap();
        assert_eq!(representation.brand.as_deref(), Some("NEW"));
        assert!(representation.vin.is_none());
        assert!(representation.production_year.is_none());
    }

    #[test]
    fn test_merge_only_overwrites_supplied_fields() {
        let mut vehicle = stored();
        VehicleRepresentation {
            brand: Some("NEW".to_string()),
            ..Default::default()
        }
        .merge_into(&mut vehicle);

        assert_eq!(vehicle.brand.as_deref(), Some("NEW"));
        assert_eq!(vehicle.model.as_deref(), Some("Test"));
        assert_eq!(vehicle.production_year, Some(2022));
        assert_eq!(vehicle.vin, "vinTest");
    }

    #[test]
    fn test_merge_never_touches_id() {
        let mut vehicle = stored();
        VehicleRepresentation {
            id: Some(99),
            vin: Some("other".to_string()),
            production_year: Some(1999),
            ..Default::default()
        }
        .merge_into(&mut vehicle);

        assert_eq!(vehicle.id, 7);
        assert_eq!(vehicle.vin, "other");
        assert_eq!(vehicle.production_year, Some(1999));
    }

    #[test]
    fn test_new_vehicle_requires_vin() {
        let result = NewVehicle::try_from(VehicleRepresentation {
            brand: Some("TST".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_new_vehicle_drops_client_id() {
        let new_vehicle = NewVehicle::try_from(VehicleRepresentation {
            id: Some(42),
            vin: Some("vinTest".to_string()),
            production_year: Some(2022),
            brand: Some("TST".to_string()),
            model: Some("Test".to_string()),
        })
        .unwrap();

        assert_eq!(new_vehicle.clone().with_id(1).id, 1);
        assert_eq!(new_vehicle.vin, "vinTest");
    }

    #[test]
    fn test_empty_vin_fails_validation() {
        let representation = VehicleRepresentation {
            vin: Some(String::new()),
            ..Default::default()
        };
        assert!(representation.validate().is_err());
        assert!(VehicleRepresentation::default().validate().is_ok());
    }
}
