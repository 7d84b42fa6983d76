//! Discord webhook delivery.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::DeliveryError;

/// Maximum response body length kept in errors.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Payload for a webhook execution.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebhookParams {
    /// Message text.
    pub content: String,
    /// Text-to-speech flag.
    pub tts: bool,
    /// Display name override. Left unset when the client has no default identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl WebhookParams {
    /// Creates a plain, non-TTS message payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tts: false,
            username: None,
        }
    }
}

/// A capability that can execute a chat webhook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookExecutor: Send + Sync {
    /// Executes the webhook identified by `webhook_id` and `token`.
    async fn execute_webhook(
        &self,
        webhook_id: &str,
        token: &str,
        params: &WebhookParams,
    ) -> Result<(), DeliveryError>;

    /// Releases the underlying connection resources.
    fn close(&self);
}

/// Executes Discord webhooks over HTTP.
pub struct DiscordWebhookClient {
    /// API base, without trailing slash.
    api_base_url: String,
    /// HTTP client.
    client: reqwest::Client,
    /// Set once `close` has been called.
    closed: AtomicBool,
}

impl DiscordWebhookClient {
    /// Creates a client against the given API base.
    pub fn new(api_base_url: &str) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stream-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeliveryError::ClientBuild)?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            client,
            closed: AtomicBool::new(false),
        })
    }

    /// Returns the execute-webhook endpoint.
    fn webhook_url(&self, webhook_id: &str, token: &str) -> String {
        format!("{}/webhooks/{}/{}", self.api_base_url, webhook_id, token)
    }
}

#[async_trait]
impl WebhookExecutor for DiscordWebhookClient {
    async fn execute_webhook(
        &self,
        webhook_id: &str,
        token: &str,
        params: &WebhookParams,
    ) -> Result<(), DeliveryError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DeliveryError::Closed);
        }

        let response = self
            .client
            .post(self.webhook_url(webhook_id, token))
            .json(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %text, "Discord webhook rejected");
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_LEN),
            });
        }

        debug!(webhook_id, "Discord webhook executed");
        Ok(())
    }

    fn close(&self) {
        // reqwest has no explicit close; idle connections go when the client drops.
        self.closed.store(true, Ordering::Release);
    }
}

/// Truncates a string to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> DiscordWebhookClient {
        DiscordWebhookClient::new(&format!("{}/api/v10", server.uri())).unwrap()
    }

    #[test]
    fn test_payload_serialization() {
        let params = WebhookParams::text("Stream __foo__ has started.");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "content": "Stream __foo__ has started.", "tts": false })
        );
    }

    #[test]
    fn test_webhook_url() {
        let client = DiscordWebhookClient::new("https://discord.com/api/v10/").unwrap();
        assert_eq!(
            client.webhook_url("123", "abc"),
            "https://discord.com/api/v10/webhooks/123/abc"
        );
    }

    #[tokio::test]
    async fn test_closed_client_does_not_send() {
        // Unroutable base; a request attempt would surface as Http, not Closed.
        let client = DiscordWebhookClient::new("http://127.0.0.1:9").unwrap();
        client.close();
        let err = client
            .execute_webhook("123", "abc", &WebhookParams::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Closed));
    }

    #[tokio::test]
    async fn test_execute_webhook_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v10/webhooks/42/tok"))
            .and(body_json(serde_json::json!({ "content": "hi", "tts": false })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .execute_webhook("42", "tok", &WebhookParams::text("hi"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejected_response_truncates_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v10/webhooks/42/tok"))
            .and(body_json(serde_json::json!({ "content": "hi", "tts": false })))
            .respond_with(ResponseTemplate::new(429).set_body_string("x".repeat(600)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .execute_webhook("42", "tok", &WebhookParams::text("hi"))
            .await
            .unwrap_err();

        match err {
            DeliveryError::Rejected { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body.len(), MAX_ERROR_BODY_LEN);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_http() {
        let client = DiscordWebhookClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .execute_webhook("42", "tok", &WebhookParams::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Http(_)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
