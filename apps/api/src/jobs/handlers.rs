//! Axum route handlers for work orders.
//!
//! Status writes go through the pipeline helpers; the paired customer
//! last-contact stamp always rides in the same transaction as the job write.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::pipeline::{completion_stamp, JobStatus, JobType};
use crate::models::customer::{Customer, CustomerRow};
use crate::models::job::{Job, JobListRow, JobRow, JobWithRefs};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub title: String,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub quoted_price: Option<f64>,
    pub deposit_amount: Option<f64>,
    pub material_notes: Option<String>,
    pub assigned_to: Option<String>,
    pub bay_number: Option<i32>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusRequest {
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: Job,
    pub customer: Customer,
    pub vehicle: Vehicle,
}

/// GET /api/v1/jobs?status=&type=
///
/// Newest first with customer name and vehicle summary; both filters optional.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> Result<Json<Vec<JobWithRefs>>, AppError> {
    let rows = sqlx::query_as::<_, JobListRow>(
        r#"
        SELECT j.*, c.name AS customer_name,
               v.year AS vehicle_year, v.make AS vehicle_make, v.model AS vehicle_model
        FROM jobs j
        JOIN customers c ON c.id = j.customer_id
        JOIN vehicles v ON v.id = j.vehicle_id
        WHERE ($1::text IS NULL OR j.status = $1)
          AND ($2::text IS NULL OR j.type = $2)
        ORDER BY j.created_at DESC
        "#,
    )
    .bind(params.status.map(|s| s.as_str()))
    .bind(params.job_type.map(|t| t.as_str()))
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/jobs
///
/// Every job starts at INQUIRY. Creating one counts as contact, so the
/// customer's last-contacted stamp is written in the same transaction.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobWithRefs>), AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation(
            "customer_id, vehicle_id, type, and title are required".to_string(),
        ));
    }

    let mut tx = state.db.begin().await?;

    let customer_name: Option<String> =
        sqlx::query_scalar("SELECT name FROM customers WHERE id = $1")
            .bind(req.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
    let customer_name =
        customer_name.ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let vehicle: Option<(i32, String, String)> = sqlx::query_as(
        "SELECT year, make, model FROM vehicles WHERE id = $1 AND customer_id = $2",
    )
    .bind(req.vehicle_id)
    .bind(req.customer_id)
    .fetch_optional(&mut *tx)
    .await?;
    let (vehicle_year, vehicle_make, vehicle_model) =
        vehicle.ok_or_else(|| AppError::NotFound("Vehicle not found for customer".to_string()))?;

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (customer_id, vehicle_id, type, status, title, description, estimated_hours,
             material_notes, assigned_to, bay_number, scheduled_date, quoted_price,
             deposit_amount, photos)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, '[]')
        RETURNING *
        "#,
    )
    .bind(req.customer_id)
    .bind(req.vehicle_id)
    .bind(req.job_type)
    .bind(JobStatus::Inquiry)
    .bind(title)
    .bind(req.description)
    .bind(req.estimated_hours)
    .bind(req.material_notes)
    .bind(req.assigned_to)
    .bind(req.bay_number)
    .bind(req.scheduled_date)
    .bind(req.quoted_price)
    .bind(req.deposit_amount)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE customers SET last_contacted_at = now(), updated_at = now() WHERE id = $1")
        .bind(req.customer_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Created job {} ({:?}) for customer {}", row.id, row.job_type, row.customer_id);

    Ok((
        StatusCode::CREATED,
        Json(JobWithRefs {
            job: row.into(),
            customer_name,
            vehicle_year,
            vehicle_make,
            vehicle_model,
        }),
    ))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let customer: CustomerRow = sqlx::query_as("SELECT * FROM customers WHERE id = $1")
        .bind(job.customer_id)
        .fetch_one(&state.db)
        .await?;

    let vehicle: Vehicle = sqlx::query_as("SELECT * FROM vehicles WHERE id = $1")
        .bind(job.vehicle_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(JobDetailResponse {
        job: job.into(),
        customer: customer.into(),
        vehicle,
    }))
}

/// PATCH /api/v1/jobs/:id
///
/// Status transition. An out-of-pipeline value never reaches here — the body
/// deserializes into JobStatus, so unknown strings are a 400 at the boundary.
/// Entering COMPLETE stamps the completion date. The job write and the
/// customer contact stamp commit together or not at all.
pub async fn handle_update_job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobStatusRequest>,
) -> Result<Json<JobWithRefs>, AppError> {
    let mut tx = state.db.begin().await?;

    let existing: Option<(Uuid, JobStatus)> =
        sqlx::query_as("SELECT customer_id, status FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let (customer_id, previous) =
        existing.ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let now = Utc::now();
    let completed = completion_stamp(req.status, now);

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            status = $2,
            completed_date = COALESCE($3, completed_date),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.status)
    .bind(completed)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE customers SET last_contacted_at = $2, updated_at = now() WHERE id = $1")
        .bind(customer_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    let refs: (String, i32, String, String) = sqlx::query_as(
        r#"
        SELECT c.name, v.year, v.make, v.model
        FROM customers c, vehicles v
        WHERE c.id = $1 AND v.id = $2
        "#,
    )
    .bind(row.customer_id)
    .bind(row.vehicle_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Job {id} moved {} -> {}",
        previous.as_str(),
        req.status.as_str()
    );

    Ok(Json(JobWithRefs {
        job: row.into(),
        customer_name: refs.0,
        vehicle_year: refs.1,
        vehicle_make: refs.2,
        vehicle_model: refs.3,
    }))
}
