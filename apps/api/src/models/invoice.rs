use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::format::parse_json_array;
use crate::invoices::status::InvoiceStatus;

/// One invoice line. Stored inside the `line_items` JSON text column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub qty: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// Invoice as stored. Subtotal/tax/total are caller-supplied, never recomputed.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub invoice_number: String,
    pub job_id: Uuid,
    pub customer_id: Uuid,
    pub line_items: String,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Invoice as served by the API: line items parsed to typed records.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub job_id: Uuid,
    pub customer_id: Uuid,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            invoice_number: row.invoice_number,
            job_id: row.job_id,
            customer_id: row.customer_id,
            line_items: parse_json_array(&row.line_items),
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            status: row.status,
            due_date: row.due_date,
            paid_at: row.paid_at,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// List-view row: invoice plus customer name and job title.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceListRow {
    #[sqlx(flatten)]
    pub invoice: InvoiceRow,
    pub customer_name: String,
    pub job_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceWithRefs {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub customer_name: String,
    pub job_title: String,
}

impl From<InvoiceListRow> for InvoiceWithRefs {
    fn from(row: InvoiceListRow) -> Self {
        InvoiceWithRefs {
            invoice: row.invoice.into(),
            customer_name: row.customer_name,
            job_title: row.job_title,
        }
    }
}
