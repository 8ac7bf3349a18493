//! Telegram Bot API client
//!
//! Talks to `{api_url}/bot{token}/{method}` with JSON bodies. Only the two
//! methods the oracle needs are implemented: `getUpdates` (long polling)
//! and `sendMessage`.

use crate::telegram::error::{BotError, BotResult};
use crate::telegram::messenger::Messenger;
use crate::telegram::types::{ApiResponse, Cursor, Update};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    /// `{api_url}/bot{token}`; holds the secret
    endpoint: String,
}

impl TelegramClient {
    /// Must comfortably outlast the long-poll timeout
    const HTTP_TIMEOUT: Duration = Duration::from_secs(40);

    pub fn new(api_url: &str, token: &str) -> BotResult<Self> {
        if token.trim().is_empty() {
            return Err(BotError::Unauthorized("Bot token cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Self::HTTP_TIMEOUT)
            .build()
            .map_err(|e| BotError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> BotResult<T> {
        let url = format!("{}/{}", self.endpoint, method);
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        let envelope: ApiResponse<T> = match response.json().await {
            Ok(envelope) => envelope,
            // Proxies answer 5xx with HTML; that is an outage, not a protocol error
            Err(_) if status.is_server_error() => {
                return Err(BotError::Network(format!("{} returned {}", method, status)));
            }
            Err(e) => return Err(BotError::Decode(format!("{}: {}", method, e))),
        };

        if envelope.ok {
            return envelope
                .result
                .ok_or_else(|| BotError::Decode(format!("{}: missing 'result'", method)));
        }

        Err(BotError::from_api(
            envelope.error_code.unwrap_or(status.as_u16()),
            envelope
                .description
                .unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_url = self.endpoint.split("/bot").next().unwrap_or_default();
        f.debug_struct("TelegramClient")
            .field("api_url", &api_url)
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn fetch_updates(&self, cursor: Cursor, timeout_secs: u64) -> BotResult<Vec<Update>> {
        let mut body = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"]
        });
        if let Some(offset) = cursor.offset() {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", body).await
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> BotResult<()> {
        let body = json!({
            "chat_id": chat_id,
            "text": text
        });
        // The sent Message object is of no interest
        let _: serde_json::Value = self.call("sendMessage", body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> TelegramClient {
        TelegramClient::new(&server.uri(), "123:secret").unwrap()
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            TelegramClient::new(DEFAULT_API_URL, " "),
            Err(BotError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_debug_masks_token() {
        let client = TelegramClient::new(DEFAULT_API_URL, "123:secret").unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("api.telegram.org"));
        assert!(!debug_str.contains("secret"));
    }

    #[tokio::test]
    async fn test_fetch_updates_sends_offset_and_parses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:secret/getUpdates"))
            .and(body_partial_json(json!({"offset": 501, "timeout": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [{
                    "update_id": 501,
                    "message": {"message_id": 1, "chat": {"id": 77}, "text": "Кто я?"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let updates = client.fetch_updates(Cursor::at(501), 10).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_id, 501);
    }

    #[tokio::test]
    async fn test_fetch_updates_without_offset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:secret/getUpdates"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.fetch_updates(Cursor::start(), 0).await.unwrap().is_empty());

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("offset").is_none());
    }

    #[tokio::test]
    async fn test_send_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:secret/sendMessage"))
            .and(body_partial_json(json!({"chat_id": 77, "text": "Истину знает только Бог."})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"message_id": 2, "chat": {"id": 77}, "text": "Истину знает только Бог."}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .send_message(77, "Истину знает только Бог.")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blocked_user_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:secret/sendMessage"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.send_message(77, "hi").await {
            Err(BotError::Unauthorized(msg)) => assert!(msg.contains("blocked")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gateway_html_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch_updates(Cursor::start(), 0).await;
        assert!(matches!(result, Err(BotError::Network(_))));
    }

    #[tokio::test]
    async fn test_bad_request_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: message text is empty"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(
            client.send_message(1, "").await,
            Err(BotError::Api {
                code: 400,
                description: "Bad Request: message text is empty".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = TelegramClient::new("http://127.0.0.1:9", "123:secret").unwrap();
        let result = client.fetch_updates(Cursor::start(), 0).await;
        assert!(matches!(result, Err(BotError::Network(_))));
    }
}
