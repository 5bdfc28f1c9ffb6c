use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::vehicle_dto::VehicleRepresentation;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/:vin",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<Json<VehicleRepresentation>, AppError> {
    let response = state.registry.get(&vin).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRepresentation>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleRepresentation>), AppError> {
    let Json(request) = payload?;
    let response = state.registry.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleRepresentation>>, AppError> {
    let response = state.registry.get_all().await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<StatusCode, AppError> {
    state.registry.delete(&vin).await?;
    Ok(StatusCode::OK)
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
    payload: Result<Json<VehicleRepresentation>, JsonRejection>,
) -> Result<Json<VehicleRepresentation>, AppError> {
    let Json(request) = payload?;
    let response = state.registry.update(&vin, request).await?;
    Ok(Json(response))
}
