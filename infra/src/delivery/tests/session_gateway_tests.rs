//! Tests for the user-session gateway client against a local stub

use std::time::Duration;

use vg_core::{DeliveryDispatcher, DeliveryError, DeliveryMode, UserSessionClient};

use super::stub::StubServer;
use crate::delivery::SessionGatewayClient;

#[tokio::test]
async fn test_connect_marks_authorized_session() {
    let stub = StubServer::respond(200, r#"{"authorized":true}"#).await;
    let client = SessionGatewayClient::new(&stub.base_url, "main", Duration::from_secs(5)).unwrap();

    assert!(!client.is_initialized());
    assert!(client.connect().await);
    assert!(client.is_initialized());
    assert!(stub.requests()[0].starts_with("GET /sessions/main HTTP/1.1"));
}

#[tokio::test]
async fn test_connect_unauthorized_session() {
    let stub = StubServer::respond(200, r#"{"authorized":false}"#).await;
    let client = SessionGatewayClient::new(&stub.base_url, "main", Duration::from_secs(5)).unwrap();

    assert!(!client.connect().await);
    assert!(!client.is_initialized());
}

#[tokio::test]
async fn test_connect_gateway_error() {
    let stub = StubServer::respond(503, r#"{"error":"starting"}"#).await;
    let client = SessionGatewayClient::new(&stub.base_url, "main", Duration::from_secs(5)).unwrap();

    assert!(!client.connect().await);
}

#[tokio::test]
async fn test_send_message_posts_json() {
    let stub = StubServer::respond(200, r#"{"id":99,"peer":"@bob"}"#).await;
    let client = SessionGatewayClient::new(&stub.base_url, "main", Duration::from_secs(5)).unwrap();

    let sent = client.send_message("@bob", "hello").await.unwrap();

    assert_eq!(sent["id"], 99);
    let request = &stub.requests()[0];
    assert!(request.starts_with("POST /sessions/main/messages HTTP/1.1"));
    assert!(request.contains(r#""recipient":"@bob""#));
    assert!(request.contains(r#""text":"hello""#));
}

#[tokio::test]
async fn test_send_message_rejected() {
    let stub = StubServer::respond(400, r#"{"error":"peer not found"}"#).await;
    let client = SessionGatewayClient::new(&stub.base_url, "main", Duration::from_secs(5)).unwrap();

    let err = client.send_message("@ghost", "hello").await.unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(ref m) if m.contains("400")));
}

#[tokio::test]
async fn test_connected_gateway_is_selected() {
    let stub = StubServer::respond(200, r#"{"authorized":true}"#).await;
    let client = SessionGatewayClient::new(&stub.base_url, "main", Duration::from_secs(5)).unwrap();
    client.connect().await;

    let dispatcher = DeliveryDispatcher::select(
        Some(std::sync::Arc::new(client)),
        false,
        None,
        Duration::from_secs(5),
    );

    assert_eq!(dispatcher.mode(), DeliveryMode::UserSession);
}
