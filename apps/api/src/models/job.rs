use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::format::parse_json_array;
use crate::jobs::pipeline::{JobStatus, JobType};

/// Job as stored. `photos` holds JSON text; `type` decodes into the closed
/// JobType set, so an out-of-set row surfaces as a decode error instead of
/// leaking into the helpers.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    #[sqlx(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    pub title: String,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub quoted_price: Option<f64>,
    pub final_price: Option<f64>,
    pub deposit_amount: Option<f64>,
    pub deposit_paid: bool,
    pub material_notes: Option<String>,
    pub assigned_to: Option<String>,
    pub bay_number: Option<i32>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub photos: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job as served by the API: photos parsed to a typed list.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    pub title: String,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub quoted_price: Option<f64>,
    pub final_price: Option<f64>,
    pub deposit_amount: Option<f64>,
    pub deposit_paid: bool,
    pub material_notes: Option<String>,
    pub assigned_to: Option<String>,
    pub bay_number: Option<i32>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            customer_id: row.customer_id,
            vehicle_id: row.vehicle_id,
            job_type: row.job_type,
            status: row.status,
            title: row.title,
            description: row.description,
            estimated_hours: row.estimated_hours,
            actual_hours: row.actual_hours,
            quoted_price: row.quoted_price,
            final_price: row.final_price,
            deposit_amount: row.deposit_amount,
            deposit_paid: row.deposit_paid,
            material_notes: row.material_notes,
            assigned_to: row.assigned_to,
            bay_number: row.bay_number,
            scheduled_date: row.scheduled_date,
            completed_date: row.completed_date,
            photos: parse_json_array(&row.photos),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// List-view row: job plus customer name and a vehicle summary, joined in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct JobListRow {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub customer_name: String,
    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithRefs {
    #[serde(flatten)]
    pub job: Job,
    pub customer_name: String,
    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
}

impl From<JobListRow> for JobWithRefs {
    fn from(row: JobListRow) -> Self {
        JobWithRefs {
            job: row.job.into(),
            customer_name: row.customer_name,
            vehicle_year: row.vehicle_year,
            vehicle_make: row.vehicle_make,
            vehicle_model: row.vehicle_model,
        }
    }
}
