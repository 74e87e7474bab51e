//! Axum route handlers for the customer book.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{on_unique_violation, AppError};
use crate::format::to_json_array;
use crate::invoices::status::InvoiceStatus;
use crate::models::customer::{Customer, CustomerListRow, CustomerRow, CustomerWithCounts};
use crate::models::invoice::{Invoice, InvoiceRow};
use crate::models::job::{JobListRow, JobWithRefs};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub last_contacted_at: Option<DateTime<Utc>>,
}

impl UpdateCustomerRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.last_contacted_at.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerStats {
    /// Sum of invoice totals currently in PAID.
    pub total_spent: f64,
    pub active_jobs: i64,
    pub total_jobs: i64,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: Customer,
    pub vehicles: Vec<Vehicle>,
    pub jobs: Vec<JobWithRefs>,
    pub invoices: Vec<Invoice>,
    pub stats: CustomerStats,
}

/// GET /api/v1/customers
///
/// Newest first, each with vehicle and job counts for the list view.
pub async fn handle_list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerWithCounts>>, AppError> {
    let rows = sqlx::query_as::<_, CustomerListRow>(
        r#"
        SELECT c.*,
               (SELECT COUNT(*) FROM vehicles v WHERE v.customer_id = c.id) AS vehicle_count,
               (SELECT COUNT(*) FROM jobs j WHERE j.customer_id = c.id) AS job_count
        FROM customers c
        ORDER BY c.created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/customers
///
/// Signup is also first contact, so the contact timestamp starts at now.
pub async fn handle_create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "name and email are required".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        INSERT INTO customers (name, email, phone, address, notes, tags, last_contacted_at)
        VALUES ($1, $2, $3, $4, $5, $6, now())
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(&email)
    .bind(non_empty(req.phone))
    .bind(non_empty(req.address))
    .bind(non_empty(req.notes))
    .bind(to_json_array(&req.tags))
    .fetch_one(&state.db)
    .await
    .map_err(|e| on_unique_violation(e, "A customer with that email already exists"))?;

    info!("Created customer {} <{}>", row.id, row.email);

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/v1/customers/:id
///
/// Customer with vehicles, jobs (with vehicle summary), invoices, and the
/// computed stats the detail page shows.
pub async fn handle_get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDetailResponse>, AppError> {
    let customer: CustomerRow = sqlx::query_as("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let vehicles = sqlx::query_as::<_, Vehicle>(
        "SELECT * FROM vehicles WHERE customer_id = $1 ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    let jobs = sqlx::query_as::<_, JobListRow>(
        r#"
        SELECT j.*, c.name AS customer_name,
               v.year AS vehicle_year, v.make AS vehicle_make, v.model AS vehicle_model
        FROM jobs j
        JOIN customers c ON c.id = j.customer_id
        JOIN vehicles v ON v.id = j.vehicle_id
        WHERE j.customer_id = $1
        ORDER BY j.created_at DESC
        "#,
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    let invoices = sqlx::query_as::<_, InvoiceRow>(
        "SELECT * FROM invoices WHERE customer_id = $1 ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    let total_spent = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Paid)
        .map(|inv| inv.total)
        .sum();
    let active_jobs = jobs.iter().filter(|j| j.job.status.is_active()).count() as i64;
    let total_jobs = jobs.len() as i64;

    Ok(Json(CustomerDetailResponse {
        customer: customer.into(),
        vehicles,
        jobs: jobs.into_iter().map(Into::into).collect(),
        invoices: invoices.into_iter().map(Into::into).collect(),
        stats: CustomerStats {
            total_spent,
            active_jobs,
            total_jobs,
        },
    }))
}

/// PATCH /api/v1/customers/:id
///
/// Partial update: absent fields keep their stored value.
pub async fn handle_update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation(
            "No fields provided to update".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        UPDATE customers SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            address = COALESCE($5, address),
            notes = COALESCE($6, notes),
            tags = COALESCE($7, tags),
            last_contacted_at = COALESCE($8, last_contacted_at),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.name)
    .bind(req.email.map(|e| e.trim().to_lowercase()))
    .bind(req.phone)
    .bind(req.address)
    .bind(req.notes)
    .bind(req.tags.map(|tags| to_json_array(&tags)))
    .bind(req.last_contacted_at)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| on_unique_violation(e, "A customer with that email already exists"))?
    .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(Json(row.into()))
}

/// Collapses blank-after-trim optional inputs to NULL.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_collapses_blank_to_none() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some("  510 Shop Rd  ".to_string())),
            Some("510 Shop Rd".to_string())
        );
    }

    #[test]
    fn test_update_request_emptiness() {
        let empty = UpdateCustomerRequest {
            name: None,
            email: None,
            phone: None,
            address: None,
            notes: None,
            tags: None,
            last_contacted_at: None,
        };
        assert!(empty.is_empty());

        let with_tags = UpdateCustomerRequest {
            tags: Some(vec!["vip".to_string()]),
            ..empty
        };
        assert!(!with_tags.is_empty());
    }
}
