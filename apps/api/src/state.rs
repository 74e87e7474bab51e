use sqlx::PgPool;

use crate::sms::SmsClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Message relay client. `None` until SMS_RELAY_URL / SMS_RELAY_PASSWORD are set;
    /// message endpoints answer 503 in that case.
    pub sms: Option<SmsClient>,
}

impl AppState {
    /// Returns the relay client or the 503 error the message endpoints surface.
    pub fn sms(&self) -> Result<&SmsClient, crate::errors::AppError> {
        self.sms
            .as_ref()
            .ok_or(crate::errors::AppError::RelayNotConfigured)
    }
}
