//! Axum route handlers for the resale inventory.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::format::to_json_array;
use crate::inventory::pipeline::{sold_at_transition, InventoryStatus};
use crate::models::inventory::{InventoryVehicle, InventoryVehicleDetail, InventoryVehicleRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InventoryListQuery {
    pub status: Option<InventoryStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInventoryVehicleRequest {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub asking_price: Option<f64>,
    pub cost_basis: Option<f64>,
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryVehicleRequest {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub asking_price: Option<f64>,
    pub cost_basis: Option<f64>,
    pub status: Option<InventoryStatus>,
    pub description: Option<String>,
    pub photos: Option<Vec<String>>,
}

impl UpdateInventoryVehicleRequest {
    fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.make.is_none()
            && self.model.is_none()
            && self.color.is_none()
            && self.vin.is_none()
            && self.mileage.is_none()
            && self.asking_price.is_none()
            && self.cost_basis.is_none()
            && self.status.is_none()
            && self.description.is_none()
            && self.photos.is_none()
    }
}

/// GET /api/v1/inventory?status=
pub async fn handle_list_inventory(
    State(state): State<AppState>,
    Query(params): Query<InventoryListQuery>,
) -> Result<Json<Vec<InventoryVehicle>>, AppError> {
    let rows = sqlx::query_as::<_, InventoryVehicleRow>(
        r#"
        SELECT * FROM inventory_vehicles
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.status.map(|s| s.as_str()))
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/inventory
pub async fn handle_create_inventory_vehicle(
    State(state): State<AppState>,
    Json(req): Json<CreateInventoryVehicleRequest>,
) -> Result<(StatusCode, Json<InventoryVehicle>), AppError> {
    let make = req.make.trim();
    let model = req.model.trim();
    if make.is_empty() || model.is_empty() {
        return Err(AppError::Validation(
            "year, make, and model are required".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, InventoryVehicleRow>(
        r#"
        INSERT INTO inventory_vehicles
            (year, make, model, color, vin, mileage, asking_price, cost_basis,
             status, description, photos)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(req.year)
    .bind(make)
    .bind(model)
    .bind(req.color)
    .bind(req.vin)
    .bind(req.mileage)
    .bind(req.asking_price)
    .bind(req.cost_basis)
    .bind(InventoryStatus::Available)
    .bind(req.description)
    .bind(to_json_array(&req.photos))
    .fetch_one(&state.db)
    .await?;

    info!(
        "Added inventory vehicle {} ({} {} {})",
        row.id, row.year, row.make, row.model
    );

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/v1/inventory/:id
///
/// Detail view carries the derived profit and margin.
pub async fn handle_get_inventory_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryVehicleDetail>, AppError> {
    let row: Option<InventoryVehicleRow> =
        sqlx::query_as("SELECT * FROM inventory_vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    let row = row.ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
    Ok(Json(row.into()))
}

/// PATCH /api/v1/inventory/:id
///
/// Partial update. When the status changes, sold_at follows the transition
/// rule: stamped entering SOLD, cleared leaving it, untouched otherwise.
pub async fn handle_update_inventory_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInventoryVehicleRequest>,
) -> Result<Json<InventoryVehicle>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation(
            "No fields provided to update".to_string(),
        ));
    }

    let existing: Option<InventoryVehicleRow> =
        sqlx::query_as("SELECT * FROM inventory_vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let sold_at = match req.status {
        Some(next) => sold_at_transition(existing.status, next, existing.sold_at, Utc::now()),
        None => existing.sold_at,
    };

    let row = sqlx::query_as::<_, InventoryVehicleRow>(
        r#"
        UPDATE inventory_vehicles SET
            year = COALESCE($2, year),
            make = COALESCE($3, make),
            model = COALESCE($4, model),
            color = COALESCE($5, color),
            vin = COALESCE($6, vin),
            mileage = COALESCE($7, mileage),
            asking_price = COALESCE($8, asking_price),
            cost_basis = COALESCE($9, cost_basis),
            status = COALESCE($10, status),
            description = COALESCE($11, description),
            photos = COALESCE($12, photos),
            sold_at = $13,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.year)
    .bind(req.make)
    .bind(req.model)
    .bind(req.color)
    .bind(req.vin)
    .bind(req.mileage)
    .bind(req.asking_price)
    .bind(req.cost_basis)
    .bind(req.status)
    .bind(req.description)
    .bind(req.photos.map(|photos| to_json_array(&photos)))
    .bind(sold_at)
    .fetch_one(&state.db)
    .await?;

    if let Some(next) = req.status {
        if next != existing.status {
            info!(
                "Inventory vehicle {id} moved {} -> {}",
                existing.status.as_str(),
                next.as_str()
            );
        }
    }

    Ok(Json(row.into()))
}
