//! Axum route handlers for customer-owned vehicles.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::vehicle::{Vehicle, VehicleWithOwner};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub customer_id: Uuid,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub color: String,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

/// GET /api/v1/vehicles?customer_id=
pub async fn handle_list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<VehicleListQuery>,
) -> Result<Json<Vec<VehicleWithOwner>>, AppError> {
    let vehicles = sqlx::query_as::<_, VehicleWithOwner>(
        r#"
        SELECT v.*, c.name AS customer_name
        FROM vehicles v
        JOIN customers c ON c.id = v.customer_id
        WHERE ($1::uuid IS NULL OR v.customer_id = $1)
        ORDER BY v.created_at DESC
        "#,
    )
    .bind(params.customer_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(vehicles))
}

/// POST /api/v1/vehicles
pub async fn handle_create_vehicle(
    State(state): State<AppState>,
    Json(req): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let make = req.make.trim();
    let model = req.model.trim();
    let color = req.color.trim();
    if make.is_empty() || model.is_empty() || color.is_empty() {
        return Err(AppError::Validation(
            "year, make, model, and color are required".to_string(),
        ));
    }

    let owner_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM customers WHERE id = $1")
        .bind(req.customer_id)
        .fetch_optional(&state.db)
        .await?;
    if owner_exists.is_none() {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }

    let vehicle = sqlx::query_as::<_, Vehicle>(
        r#"
        INSERT INTO vehicles (customer_id, year, make, model, color, vin, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(req.customer_id)
    .bind(req.year)
    .bind(make)
    .bind(model)
    .bind(color)
    .bind(req.vin)
    .bind(req.notes)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Created vehicle {} ({} {} {})",
        vehicle.id, vehicle.year, vehicle.make, vehicle.model
    );

    Ok((StatusCode::CREATED, Json(vehicle)))
}
