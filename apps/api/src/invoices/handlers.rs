//! Axum route handlers for invoices.
//!
//! Totals are caller-supplied and stored as-is — nothing here recomputes
//! subtotal/tax/total from the line items.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{on_unique_violation, AppError};
use crate::format::to_json_array;
use crate::invoices::status::{paid_at_transition, InvoiceStatus};
use crate::models::invoice::{InvoiceListRow, InvoiceRow, InvoiceWithRefs, LineItem};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_id: Uuid,
    pub job_id: Uuid,
    pub invoice_number: String,
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

/// GET /api/v1/invoices
pub async fn handle_list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceWithRefs>>, AppError> {
    let rows = sqlx::query_as::<_, InvoiceListRow>(
        r#"
        SELECT i.*, c.name AS customer_name, j.title AS job_title
        FROM invoices i
        JOIN customers c ON c.id = i.customer_id
        JOIN jobs j ON j.id = i.job_id
        ORDER BY i.created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/invoices
///
/// Status always starts DRAFT; PAID only happens through the status PATCH so
/// the paid-at rule stays in one place.
pub async fn handle_create_invoice(
    State(state): State<AppState>,
    Json(req): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceWithRefs>), AppError> {
    let invoice_number = req.invoice_number.trim();
    if invoice_number.is_empty() {
        return Err(AppError::Validation(
            "invoice_number is required".to_string(),
        ));
    }
    if req.line_items.is_empty() {
        return Err(AppError::Validation(
            "at least one line item is required".to_string(),
        ));
    }

    let customer_name: Option<String> =
        sqlx::query_scalar("SELECT name FROM customers WHERE id = $1")
            .bind(req.customer_id)
            .fetch_optional(&state.db)
            .await?;
    let customer_name =
        customer_name.ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let job_title: Option<String> =
        sqlx::query_scalar("SELECT title FROM jobs WHERE id = $1 AND customer_id = $2")
            .bind(req.job_id)
            .bind(req.customer_id)
            .fetch_optional(&state.db)
            .await?;
    let job_title =
        job_title.ok_or_else(|| AppError::NotFound("Job not found for customer".to_string()))?;

    let row = sqlx::query_as::<_, InvoiceRow>(
        r#"
        INSERT INTO invoices
            (invoice_number, job_id, customer_id, line_items, subtotal, tax, total,
             status, due_date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(invoice_number)
    .bind(req.job_id)
    .bind(req.customer_id)
    .bind(to_json_array(&req.line_items))
    .bind(req.subtotal)
    .bind(req.tax)
    .bind(req.total)
    .bind(InvoiceStatus::Draft)
    .bind(req.due_date)
    .bind(req.notes)
    .fetch_one(&state.db)
    .await
    .map_err(|e| on_unique_violation(e, "An invoice with that number already exists"))?;

    info!("Created invoice {} ({})", row.id, row.invoice_number);

    Ok((
        StatusCode::CREATED,
        Json(InvoiceWithRefs {
            invoice: row.into(),
            customer_name,
            job_title,
        }),
    ))
}

/// GET /api/v1/invoices/:id
pub async fn handle_get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceWithRefs>, AppError> {
    let row: Option<InvoiceListRow> = sqlx::query_as(
        r#"
        SELECT i.*, c.name AS customer_name, j.title AS job_title
        FROM invoices i
        JOIN customers c ON c.id = i.customer_id
        JOIN jobs j ON j.id = i.job_id
        WHERE i.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
    Ok(Json(row.into()))
}

/// PATCH /api/v1/invoices/:id
///
/// Status change. Entering PAID stamps paid_at; leaving PAID clears it.
pub async fn handle_update_invoice_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInvoiceStatusRequest>,
) -> Result<Json<InvoiceWithRefs>, AppError> {
    let existing: Option<(InvoiceStatus, Option<DateTime<Utc>>)> =
        sqlx::query_as("SELECT status, paid_at FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let (previous, paid_at) =
        existing.ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

    let new_paid_at = paid_at_transition(previous, req.status, paid_at, Utc::now());

    let row: InvoiceListRow = sqlx::query_as(
        r#"
        WITH updated AS (
            UPDATE invoices SET status = $2, paid_at = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
        )
        SELECT u.*, c.name AS customer_name, j.title AS job_title
        FROM updated u
        JOIN customers c ON c.id = u.customer_id
        JOIN jobs j ON j.id = u.job_id
        "#,
    )
    .bind(id)
    .bind(req.status)
    .bind(new_paid_at)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Invoice {id} moved {} -> {}",
        previous.as_str(),
        req.status.as_str()
    );

    Ok(Json(row.into()))
}
