//! Axum route handlers for SMS marketing campaigns.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::format::{parse_json_array, to_json_array};
use crate::marketing::status::MarketingStatus;
use crate::models::campaign::{Campaign, CampaignRow};
use crate::models::customer::CustomerRow;
use crate::sms::to_e164;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub recipient_tags: Vec<String>,
}

/// GET /api/v1/campaigns
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    let rows = sqlx::query_as::<_, CampaignRow>(
        "SELECT * FROM marketing_campaigns ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/campaigns
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    let name = req.name.trim();
    let message = req.message.trim();
    if name.is_empty() || message.is_empty() {
        return Err(AppError::Validation(
            "name and message are required".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CampaignRow>(
        r#"
        INSERT INTO marketing_campaigns (name, message, recipient_tags, status)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(message)
    .bind(to_json_array(&req.recipient_tags))
    .bind(MarketingStatus::Draft)
    .fetch_one(&state.db)
    .await?;

    info!("Created campaign {} ({})", row.id, row.name);

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/v1/campaigns/:id
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, AppError> {
    let row: Option<CampaignRow> =
        sqlx::query_as("SELECT * FROM marketing_campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    let row = row.ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
    Ok(Json(row.into()))
}

/// POST /api/v1/campaigns/:id/send
///
/// Resolves the recipient list, delivers the message to each recipient
/// through the relay, and marks the campaign SENT. A campaign with no
/// recipient tags goes to every customer with a phone number on file.
/// Individual delivery failures are logged and skipped so one bad number
/// cannot stall the rest of the blast.
pub async fn handle_send_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, AppError> {
    let campaign: Option<CampaignRow> =
        sqlx::query_as("SELECT * FROM marketing_campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let campaign = campaign.ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;

    if campaign.status == MarketingStatus::Sent {
        return Err(AppError::Conflict(
            "Campaign has already been sent".to_string(),
        ));
    }

    let sms = state.sms()?;
    let tags: Vec<String> = parse_json_array(&campaign.recipient_tags);

    let reachable = sqlx::query_as::<_, CustomerRow>(
        "SELECT * FROM customers WHERE phone IS NOT NULL ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let recipients: Vec<&CustomerRow> = reachable
        .iter()
        .filter(|c| {
            if tags.is_empty() {
                return true;
            }
            let customer_tags: Vec<String> = parse_json_array(&c.tags);
            customer_tags.iter().any(|t| tags.contains(t))
        })
        .collect();

    let recipient_count = recipients.len() as i32;
    let mut delivered_count = 0i32;

    for customer in recipients {
        let Some(phone) = customer.phone.as_deref() else {
            continue;
        };
        match sms.send_text(&to_e164(phone), &campaign.message).await {
            Ok(_) => {
                sqlx::query(
                    r#"
                    UPDATE customers
                    SET last_contacted_at = now(),
                        last_contact_method = 'iMessage',
                        updated_at = now()
                    WHERE id = $1
                    "#,
                )
                .bind(customer.id)
                .execute(&state.db)
                .await?;
                delivered_count += 1;
            }
            Err(err) => {
                warn!(
                    "Campaign {id}: delivery to customer {} failed: {err}",
                    customer.id
                );
            }
        }
    }

    let row = sqlx::query_as::<_, CampaignRow>(
        r#"
        UPDATE marketing_campaigns
        SET recipient_count = $2,
            delivered_count = $3,
            status = $4,
            sent_at = now(),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(recipient_count)
    .bind(delivered_count)
    .bind(MarketingStatus::Sent)
    .fetch_one(&state.db)
    .await?;

    info!("Campaign {id} sent: {delivered_count}/{recipient_count} delivered");

    Ok(Json(row.into()))
}
