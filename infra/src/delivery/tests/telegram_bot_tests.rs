//! Tests for the Telegram bot backend against a local stub

use std::time::Duration;

use vg_core::{DeliveryBackend, DeliveryError};
use vg_shared::DeliveryConfig;

use super::stub::StubServer;
use crate::delivery::TelegramBotBackend;

const TOKEN: &str = "123456:ABC-secret";

#[tokio::test]
async fn test_send_message_posts_form() {
    let stub = StubServer::respond(200, r#"{"ok":true,"result":{"message_id":7}}"#).await;
    let backend = TelegramBotBackend::new(TOKEN, &stub.base_url, Duration::from_secs(5)).unwrap();

    let outcome = backend
        .send("42", "Your verification code is: 04217")
        .await
        .unwrap();

    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.body["result"]["message_id"], 7);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.starts_with("POST /bot123456:ABC-secret/sendMessage HTTP/1.1"));
    assert!(request
        .to_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    assert!(request.contains("chat_id=42"));
    assert!(request.contains("text=Your+verification+code+is%3A+04217"));
}

#[tokio::test]
async fn test_error_status_is_passed_through() {
    let stub = StubServer::respond(
        400,
        r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
    )
    .await;
    let backend = TelegramBotBackend::new(TOKEN, &stub.base_url, Duration::from_secs(5)).unwrap();

    let outcome = backend.send("@nobody", "hi").await.unwrap();

    assert_eq!(outcome.status_code, 400);
    assert!(!outcome.is_success());
    assert_eq!(outcome.body["description"], "Bad Request: chat not found");
}

#[tokio::test]
async fn test_non_json_body_is_wrapped() {
    let stub = StubServer::respond(502, "upstream down").await;
    let backend = TelegramBotBackend::new(TOKEN, &stub.base_url, Duration::from_secs(5)).unwrap();

    let outcome = backend.send("42", "hi").await.unwrap();

    assert_eq!(outcome.status_code, 502);
    assert_eq!(outcome.body["text"], "upstream down");
}

#[tokio::test]
async fn test_unanswered_request_times_out() {
    let stub = StubServer::silent().await;
    let backend = TelegramBotBackend::new(TOKEN, &stub.base_url, Duration::from_secs(1)).unwrap();

    let err = backend.send("42", "hi").await.unwrap_err();

    assert_eq!(err, DeliveryError::Timeout { seconds: 1 });
}

#[tokio::test]
async fn test_connection_refused_hides_token() {
    // Bind and drop to get a port nobody listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let backend = TelegramBotBackend::new(
        TOKEN,
        format!("http://127.0.0.1:{}", port),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = backend.send("42", "hi").await.unwrap_err();

    match err {
        DeliveryError::Transport(message) => assert!(!message.contains("ABC-secret")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_from_config() {
    let config = DeliveryConfig::default();
    assert!(TelegramBotBackend::from_config(&config).unwrap().is_none());

    let config = DeliveryConfig {
        bot_token: Some(TOKEN.to_string()),
        ..DeliveryConfig::default()
    };
    let backend = TelegramBotBackend::from_config(&config).unwrap().unwrap();
    assert!(!format!("{:?}", backend).contains("ABC-secret"));
}

#[test]
fn test_empty_token_rejected() {
    assert!(TelegramBotBackend::new("  ", "http://localhost", Duration::from_secs(1)).is_err());
}
