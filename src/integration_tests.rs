//! End-to-end tests: a mock Bot API server, the real Telegram client, the
//! conversation loop and the answer pipeline over scripted translators.
//!
//! # Running the live test
//!
//! ```bash
//! cargo test --lib integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use crate::answer::AnswerGenerator;
    use crate::config::{AnswerConfig, FALLBACK_SENTENCE, GREETING};
    use crate::mt::{GoogleTranslateProvider, MockMode, MockTranslator, MtError};
    use crate::telegram::{ConversationLoop, Cursor, TelegramClient};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "4242:test";

    async fn mount_updates(server: &MockServer, updates: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/bot{}/getUpdates", TOKEN)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": updates})),
            )
            .mount(server)
            .await;
    }

    async fn mount_send(server: &MockServer, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/bot{}/sendMessage", TOKEN)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn sent_texts(server: &MockServer) -> Vec<(i64, String)> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path().ends_with("/sendMessage"))
            .map(|r| {
                let body: Value = serde_json::from_slice(&r.body).unwrap();
                (
                    body["chat_id"].as_i64().unwrap(),
                    body["text"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    fn message(update_id: i64, chat_id: i64, text: &str) -> Value {
        json!({
            "update_id": update_id,
            "message": {
                "message_id": update_id,
                "chat": {"id": chat_id, "type": "private"},
                "date": 1700000000,
                "text": text
            }
        })
    }

    fn conversation(
        server: &MockServer,
        translator: MockTranslator,
    ) -> ConversationLoop<TelegramClient, MockTranslator, StdRng> {
        let client = TelegramClient::new(&server.uri(), TOKEN).unwrap();
        let oracle = AnswerGenerator::new(translator, AnswerConfig::default()).unwrap();
        ConversationLoop::new(client, oracle, StdRng::seed_from_u64(11))
            .with_retry_delay(Duration::from_millis(1))
            .with_poll_timeout(0)
    }

    #[tokio::test]
    async fn test_e2e_backlog_is_answered() {
        let server = MockServer::start().await;
        mount_updates(
            &server,
            json!([
                message(300, 1, "/start"),
                message(301, 2, "Будет ли завтра дождь?"),
                {"update_id": 302, "edited_message": {"message_id": 9, "chat": {"id": 3}}}
            ]),
        )
        .await;
        mount_send(&server, 200, json!({"ok": true, "result": {}})).await;

        let translator = MockTranslator::scripted(vec![
            Ok("will it rain tomorrow".to_string()),
            Ok("Дождь завтра будет, но не здесь".to_string()),
        ]);
        let mut bot = conversation(&server, translator);

        let cursor = bot.initial_cursor().await.unwrap();
        assert_eq!(cursor, Cursor::at(300));

        let cursor = bot.poll_once(cursor).await.unwrap();
        assert_eq!(cursor, Cursor::at(303));

        assert_eq!(
            sent_texts(&server).await,
            vec![
                (1, GREETING.to_string()),
                (2, "Дождь завтра будет, но не здесь".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_e2e_translation_outage_sends_fallback() {
        let server = MockServer::start().await;
        mount_updates(&server, json!([message(10, 5, "Кто я?")])).await;
        mount_send(&server, 200, json!({"ok": true, "result": {}})).await;

        let translator = MockTranslator::new(MockMode::Error("quota exceeded".to_string()));
        let mut bot = conversation(&server, translator);

        bot.poll_once(Cursor::at(10)).await.unwrap();
        assert_eq!(sent_texts(&server).await, vec![(5, FALLBACK_SENTENCE.to_string())]);
    }

    #[tokio::test]
    async fn test_e2e_flaky_translation_recovers() {
        let server = MockServer::start().await;
        mount_updates(&server, json!([message(1, 8, "What is love?")])).await;
        mount_send(&server, 200, json!({"ok": true, "result": {}})).await;

        let translator = MockTranslator::scripted(vec![
            Ok("what is love".to_string()),
            Err(MtError::Timeout("slow".to_string())),
            Ok("What is love, baby".to_string()),
            Ok("".to_string()),
            Ok("Любовь это шабол".to_string()),
        ]);
        let mut bot = conversation(&server, translator);

        bot.poll_once(Cursor::at(1)).await.unwrap();
        assert_eq!(sent_texts(&server).await, vec![(8, "Любовь это шабол".to_string())]);
    }

    #[tokio::test]
    async fn test_e2e_blocked_chat_is_skipped() {
        let server = MockServer::start().await;
        mount_updates(
            &server,
            json!([message(50, 1, "/start"), message(51, 2, "/start")]),
        )
        .await;
        mount_send(
            &server,
            403,
            json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            }),
        )
        .await;

        let mut bot = conversation(&server, MockTranslator::new(MockMode::NoOp));
        let cursor = bot.poll_once(Cursor::at(50)).await.unwrap();
        assert_eq!(cursor, Cursor::at(52));
        // Both replies were attempted
        assert_eq!(sent_texts(&server).await.len(), 2);
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_oracle_answer() {
        let translator = GoogleTranslateProvider::from_env().expect("provider");
        let oracle = AnswerGenerator::new(translator, AnswerConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let reply = oracle.respond("Что меня ждёт завтра?", &mut rng).await;
        println!("🔮 {:?}", reply);
        assert!(!reply.text().is_empty());
    }
}
