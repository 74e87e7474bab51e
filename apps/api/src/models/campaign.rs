use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::format::parse_json_array;
use crate::marketing::status::MarketingStatus;

/// SMS campaign as stored. `recipient_tags` holds JSON text; the counters are
/// written once by the send handler.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignRow {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub recipient_tags: String,
    pub recipient_count: i32,
    pub delivered_count: i32,
    pub read_count: i32,
    pub status: MarketingStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campaign as served by the API: recipient tags parsed to a typed list.
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub recipient_tags: Vec<String>,
    pub recipient_count: i32,
    pub delivered_count: i32,
    pub read_count: i32,
    pub status: MarketingStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Campaign {
            id: row.id,
            name: row.name,
            message: row.message,
            recipient_tags: parse_json_array(&row.recipient_tags),
            recipient_count: row.recipient_count,
            delivered_count: row.delivered_count,
            read_count: row.read_count,
            status: row.status,
            sent_at: row.sent_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
