use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::format::parse_json_array;
use crate::inventory::margins::{margin_percent, profit};
use crate::inventory::pipeline::InventoryStatus;

/// Resale vehicle as stored. `sold_at` is owned by the status-transition
/// handler: set entering SOLD, cleared leaving it.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryVehicleRow {
    pub id: Uuid,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub asking_price: Option<f64>,
    pub cost_basis: Option<f64>,
    pub status: InventoryStatus,
    pub description: Option<String>,
    pub photos: String,
    pub sold_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resale vehicle as served by the API: photos parsed to a typed list.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryVehicle {
    pub id: Uuid,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub asking_price: Option<f64>,
    pub cost_basis: Option<f64>,
    pub status: InventoryStatus,
    pub description: Option<String>,
    pub photos: Vec<String>,
    pub sold_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InventoryVehicleRow> for InventoryVehicle {
    fn from(row: InventoryVehicleRow) -> Self {
        InventoryVehicle {
            id: row.id,
            year: row.year,
            make: row.make,
            model: row.model,
            color: row.color,
            vin: row.vin,
            mileage: row.mileage,
            asking_price: row.asking_price,
            cost_basis: row.cost_basis,
            status: row.status,
            description: row.description,
            photos: parse_json_array(&row.photos),
            sold_at: row.sold_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Detail view: vehicle plus the derived money fields. Computed on read,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryVehicleDetail {
    #[serde(flatten)]
    pub vehicle: InventoryVehicle,
    pub profit: Option<f64>,
    pub margin_percent: Option<f64>,
}

impl From<InventoryVehicleRow> for InventoryVehicleDetail {
    fn from(row: InventoryVehicleRow) -> Self {
        let profit = profit(row.asking_price, row.cost_basis);
        let margin_percent = margin_percent(row.asking_price, row.cost_basis);
        InventoryVehicleDetail {
            vehicle: row.into(),
            profit,
            margin_percent,
        }
    }
}
