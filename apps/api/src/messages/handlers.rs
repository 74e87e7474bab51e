//! Axum route handler for one-off outbound texts.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::sms::to_e164;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub phone: String,
    pub message: String,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_guid: Option<String>,
}

/// POST /api/v1/messages/send
///
/// Sends a single text through the relay. When a customer id comes along,
/// the customer's contact log is stamped after a successful delivery.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let phone = req.phone.trim();
    let message = req.message.trim();
    if phone.is_empty() || message.is_empty() {
        return Err(AppError::Validation(
            "phone and message are required".to_string(),
        ));
    }

    if let Some(customer_id) = req.customer_id {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM customers WHERE id = $1")
            .bind(customer_id)
            .fetch_optional(&state.db)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }
    }

    let to = to_e164(phone);
    let sms = state.sms()?;
    let delivery = sms.send_text(&to, message).await?;

    if let Some(customer_id) = req.customer_id {
        sqlx::query(
            r#"
            UPDATE customers
            SET last_contacted_at = now(),
                last_contact_method = 'iMessage',
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .execute(&state.db)
        .await?;
    }

    info!("Sent text to {to}");

    Ok(Json(SendMessageResponse {
        success: true,
        message_guid: delivery.message_guid,
    }))
}
