//! Enum catalogs for UI consumption: every closed status/type set with its
//! stored value, display label, and badge color.

use axum::Json;
use serde::Serialize;

use crate::inventory::pipeline::INVENTORY_STATUS_ORDER;
use crate::invoices::status::INVOICE_STATUSES;
use crate::jobs::pipeline::{JOB_STATUS_ORDER, JOB_TYPES};
use crate::marketing::status::MARKETING_STATUSES;

#[derive(Debug, Serialize)]
pub struct EnumEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub job_statuses: Vec<EnumEntry>,
    pub job_types: Vec<EnumEntry>,
    pub invoice_statuses: Vec<EnumEntry>,
    pub inventory_statuses: Vec<EnumEntry>,
    pub marketing_statuses: Vec<EnumEntry>,
}

/// GET /api/v1/meta
pub async fn handle_get_meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        job_statuses: JOB_STATUS_ORDER
            .iter()
            .map(|s| EnumEntry {
                value: s.as_str(),
                label: s.label(),
                color: s.color(),
            })
            .collect(),
        job_types: JOB_TYPES
            .iter()
            .map(|t| EnumEntry {
                value: t.as_str(),
                label: t.label(),
                color: t.color(),
            })
            .collect(),
        invoice_statuses: INVOICE_STATUSES
            .iter()
            .map(|s| EnumEntry {
                value: s.as_str(),
                label: s.label(),
                color: s.color(),
            })
            .collect(),
        inventory_statuses: INVENTORY_STATUS_ORDER
            .iter()
            .map(|s| EnumEntry {
                value: s.as_str(),
                label: s.label(),
                color: s.color(),
            })
            .collect(),
        marketing_statuses: MARKETING_STATUSES
            .iter()
            .map(|s| EnumEntry {
                value: s.as_str(),
                label: s.label(),
                color: s.color(),
            })
            .collect(),
    })
}
