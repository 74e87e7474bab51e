use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::format::parse_json_array;

/// Customer as stored. `tags` holds JSON text, always read/written wholesale.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub tags: String,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub last_contact_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer as served by the API: tags parsed to a typed list.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub last_contact_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            notes: row.notes,
            tags: parse_json_array(&row.tags),
            last_contacted_at: row.last_contacted_at,
            last_contact_method: row.last_contact_method,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// List-view row: customer plus vehicle/job counts.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerListRow {
    #[sqlx(flatten)]
    pub customer: CustomerRow,
    pub vehicle_count: i64,
    pub job_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithCounts {
    #[serde(flatten)]
    pub customer: Customer,
    pub vehicle_count: i64,
    pub job_count: i64,
}

impl From<CustomerListRow> for CustomerWithCounts {
    fn from(row: CustomerListRow) -> Self {
        CustomerWithCounts {
            customer: row.customer.into(),
            vehicle_count: row.vehicle_count,
            job_count: row.job_count,
        }
    }
}
