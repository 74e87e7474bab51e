//! Axum route handler for the shop dashboard.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::inventory::pipeline::InventoryStatus;
use crate::jobs::pipeline::{JobStatus, JOB_STATUS_ORDER};
use crate::models::inventory::{InventoryVehicle, InventoryVehicleRow};
use crate::models::job::{JobListRow, JobWithRefs};
use crate::state::AppState;

const RECENT_JOBS_LIMIT: i64 = 5;
const INVENTORY_PREVIEW_LIMIT: i64 = 4;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Sum of PAID invoice totals in the current calendar month.
    pub monthly_revenue: f64,
    pub active_jobs: i64,
    pub total_customers: i64,
    /// Sum of quoted prices over jobs still in the sales pipeline.
    pub pipeline_value: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_jobs: Vec<JobWithRefs>,
    pub available_inventory: Vec<InventoryVehicle>,
}

/// GET /api/v1/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let monthly_revenue: f64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(total), 0)
        FROM invoices
        WHERE status = 'PAID' AND paid_at >= date_trunc('month', now())
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    let active_statuses: Vec<&str> = JOB_STATUS_ORDER
        .iter()
        .filter(|s| s.is_active())
        .map(JobStatus::as_str)
        .collect();
    let active_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = ANY($1)")
        .bind(&active_statuses)
        .fetch_one(&state.db)
        .await?;

    let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(&state.db)
        .await?;

    let pipeline_statuses: Vec<&str> = JOB_STATUS_ORDER
        .iter()
        .filter(|s| s.is_pipeline())
        .map(JobStatus::as_str)
        .collect();
    let pipeline_value: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(quoted_price), 0) FROM jobs WHERE status = ANY($1)",
    )
    .bind(&pipeline_statuses)
    .fetch_one(&state.db)
    .await?;

    let recent_jobs = sqlx::query_as::<_, JobListRow>(
        r#"
        SELECT j.*,
               c.name AS customer_name,
               v.year AS vehicle_year, v.make AS vehicle_make, v.model AS vehicle_model
        FROM jobs j
        JOIN customers c ON c.id = j.customer_id
        JOIN vehicles v ON v.id = j.vehicle_id
        ORDER BY j.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(RECENT_JOBS_LIMIT)
    .fetch_all(&state.db)
    .await?;

    let available_inventory = sqlx::query_as::<_, InventoryVehicleRow>(
        r#"
        SELECT * FROM inventory_vehicles
        WHERE status = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(InventoryStatus::Available)
    .bind(INVENTORY_PREVIEW_LIMIT)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DashboardResponse {
        stats: DashboardStats {
            monthly_revenue,
            active_jobs,
            total_customers,
            pipeline_value,
        },
        recent_jobs: recent_jobs.into_iter().map(Into::into).collect(),
        available_inventory: available_inventory.into_iter().map(Into::into).collect(),
    }))
}
