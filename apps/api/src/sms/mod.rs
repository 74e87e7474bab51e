/// Message relay client — the single point of entry for all outbound texts.
///
/// Wraps a BlueBubbles-style iMessage relay: one POST per message, no retries.
/// A failed send is surfaced to the caller as-is and never rolls back local
/// state that was already committed.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const SEND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("failed to reach message relay: {0}")]
    Http(#[from] reqwest::Error),

    #[error("relay error (status {status}): {message}")]
    Relay { status: u16, message: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayTextRequest<'a> {
    chat_guid: String,
    temp_guid: String,
    message: &'a str,
}

/// Relay response envelope. Parsed tolerantly — a success with an unexpected
/// body still counts as delivered, just without a provider message id.
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    data: Option<RelayMessageData>,
}

#[derive(Debug, Deserialize)]
struct RelayMessageData {
    guid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SmsDelivery {
    pub message_guid: Option<String>,
}

/// The relay client shared by the message and campaign handlers.
#[derive(Clone)]
pub struct SmsClient {
    client: Client,
    base_url: String,
    password: String,
}

impl SmsClient {
    pub fn new(base_url: String, password: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(SEND_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            password,
        }
    }

    /// Sends one text to an E.164 destination. Exactly one request; the caller
    /// decides what a failure means (single sends fail the request, campaign
    /// sends skip the recipient).
    pub async fn send_text(&self, to_e164: &str, message: &str) -> Result<SmsDelivery, SmsError> {
        let url = format!(
            "{}/api/v1/message/text",
            self.base_url.trim_end_matches('/')
        );
        let request_body = RelayTextRequest {
            chat_guid: format!("iMessage;-;{to_e164}"),
            temp_guid: format!(
                "temp-{}-{}",
                chrono::Utc::now().timestamp_millis(),
                Uuid::new_v4().simple()
            ),
            message,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("password", &self.password)])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(SmsError::Relay {
                status: status.as_u16(),
                message: body,
            });
        }

        let message_guid = serde_json::from_str::<RelayEnvelope>(&body)
            .ok()
            .and_then(|env| env.data)
            .and_then(|data| data.guid);

        debug!("Relay send succeeded: to={to_e164}, guid={message_guid:?}");

        Ok(SmsDelivery { message_guid })
    }
}

/// Converts any phone format to E.164: strips to digits, keeps a leading `1`
/// or prefixes one, then prepends `+`. `"(714) 725-0215"` → `"+17147250215"`.
pub fn to_e164(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with('1') {
        format!("+{digits}")
    } else {
        format!("+1{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_to_e164_formats_us_number() {
        assert_eq!(to_e164("(714) 725-0215"), "+17147250215");
        assert_eq!(to_e164("714-725-0215"), "+17147250215");
    }

    #[test]
    fn test_to_e164_keeps_leading_country_code() {
        assert_eq!(to_e164("17147250215"), "+17147250215");
        assert_eq!(to_e164("+1 (714) 725-0215"), "+17147250215");
    }

    #[test]
    fn test_relay_envelope_parses_without_guid() {
        let env: RelayEnvelope = serde_json::from_str(r#"{"status":200,"data":{}}"#).unwrap();
        assert!(env.data.unwrap().guid.is_none());

        let env: RelayEnvelope = serde_json::from_str(r#"{"status":200}"#).unwrap();
        assert!(env.data.is_none());
    }

    #[tokio::test]
    async fn test_send_text_posts_to_relay_and_returns_guid() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/message/text"))
            .and(query_param("password", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "data": { "guid": "msg-guid-123" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SmsClient::new(server.uri(), "secret".to_string());
        let delivery = client.send_text("+17147250215", "hello").await.unwrap();

        assert_eq!(delivery.message_guid.as_deref(), Some("msg-guid-123"));
    }

    #[tokio::test]
    async fn test_send_text_addresses_the_imessage_chat() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/message/text"))
            .and(body_partial_json(json!({
                "chatGuid": "iMessage;-;+17147250215",
                "message": "Your wrap is ready for pickup"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 200 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SmsClient::new(server.uri(), "pw".to_string());
        let delivery = client
            .send_text("+17147250215", "Your wrap is ready for pickup")
            .await
            .unwrap();

        // Unexpected-but-successful body still counts as delivered
        assert!(delivery.message_guid.is_none());
    }

    #[tokio::test]
    async fn test_send_text_surfaces_relay_error_with_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/message/text"))
            .respond_with(ResponseTemplate::new(500).set_body_string("relay exploded"))
            .mount(&server)
            .await;

        let client = SmsClient::new(server.uri(), "pw".to_string());
        let err = client.send_text("+17147250215", "hello").await.unwrap_err();

        match err {
            SmsError::Relay { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "relay exploded");
            }
            other => panic!("expected relay error, got {other:?}"),
        }
    }
}
